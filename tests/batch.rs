//! End-to-end batch behavior over a real directory tree, with the model
//! replaced by a scripted transcriber.

use std::fs;
use std::path::{Path, PathBuf};

use subgen::Error;
use subgen::batch::{confirm_batch, run_batch};
use subgen::job::{BatchJob, ModelVariant};
use subgen::media::MediaFile;
use subgen::resolver::resolve;
use subgen::segments::Segment;
use subgen::transcriber::Transcriber;

struct ScriptedTranscriber {
    fail_on: Option<String>,
}

impl Transcriber for ScriptedTranscriber {
    fn transcribe(
        &mut self,
        path: &Path,
        _language: Option<&str>,
    ) -> subgen::Result<Vec<Segment>> {
        let name = path
            .file_name()
            .expect("test paths have names")
            .to_string_lossy()
            .into_owned();

        if self.fail_on.as_deref() == Some(name.as_str()) {
            return Err(Error::Transcription("decoder ran out of memory".to_owned()));
        }

        Ok(vec![
            Segment {
                start_seconds: 0.0,
                end_seconds: 2.5,
                text: format!("opening of {name}"),
            },
            Segment {
                start_seconds: 2.5,
                end_seconds: 130.0,
                text: "middle".to_owned(),
            },
            Segment {
                start_seconds: 130.0,
                end_seconds: 131.0,
                text: "closing".to_owned(),
            },
        ])
    }
}

fn seed_tree(dir: &Path) {
    for name in ["beta.mp3", "alpha.wav", "video.mp4", "skip.txt", "skip.flac"] {
        fs::write(dir.join(name), b"").expect("write fixture");
    }
}

fn job_over(files: Vec<MediaFile>, output_dir: Option<PathBuf>, text: bool) -> BatchJob {
    BatchJob {
        files,
        model: ModelVariant::Base,
        language: None,
        output_dir,
        write_text: text,
        write_lrc: false,
    }
}

#[test]
fn resolver_is_deterministic_and_filters_unsupported_files() {
    let dir = tempfile::tempdir().expect("create temp dir");
    seed_tree(dir.path());

    let first = resolve(dir.path(), false).expect("first resolve");
    let second = resolve(dir.path(), false).expect("second resolve");

    let paths: Vec<_> = first.iter().map(|f| f.path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            dir.path().join("alpha.wav"),
            dir.path().join("beta.mp3"),
            dir.path().join("video.mp4"),
        ]
    );
    assert_eq!(
        paths,
        second.iter().map(|f| f.path.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn declined_confirmation_writes_nothing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    seed_tree(dir.path());

    let files = resolve(dir.path(), false).expect("resolve tree");
    let mut prompt_out = Vec::new();

    let err = confirm_batch(&files, b"n\n".as_slice(), &mut prompt_out).unwrap_err();
    assert!(matches!(err, Error::UserCancelled));

    // Declining happens before any transcription, so no artifacts exist.
    let artifacts: Vec<_> = fs::read_dir(dir.path())
        .expect("read dir")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext == "srt" || ext == "txt" || ext == "lrc")
        })
        .filter(|p| !p.ends_with("skip.txt"))
        .collect();
    assert!(artifacts.is_empty(), "unexpected artifacts: {artifacts:?}");
}

#[test]
fn one_failing_file_leaves_the_rest_of_the_batch_intact() {
    let dir = tempfile::tempdir().expect("create temp dir");
    seed_tree(dir.path());

    let files = resolve(dir.path(), false).expect("resolve tree");
    assert_eq!(files.len(), 3);

    let job = job_over(files, None, true);
    let mut transcriber = ScriptedTranscriber {
        fail_on: Some("beta.mp3".to_owned()),
    };

    let summary = run_batch(&mut transcriber, &job);

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failures.len(), 1);
    assert!(summary.failures[0].path.ends_with("beta.mp3"));
    assert!(summary.failures[0].reason.contains("out of memory"));

    for stem in ["alpha", "video"] {
        assert!(dir.path().join(format!("{stem}.srt")).exists());
        assert!(dir.path().join(format!("{stem}.txt")).exists());
    }
    assert!(!dir.path().join("beta.srt").exists());
    assert!(!dir.path().join("beta.txt").exists());

    // Cue timing survives the whole pipeline: the third segment starts at
    // 130 seconds, which renders as 00:02:10,000.
    let srt = fs::read_to_string(dir.path().join("alpha.srt")).expect("read srt");
    let cues: Vec<&str> = srt.trim_end().split("\n\n").collect();
    assert_eq!(cues.len(), 3);
    assert!(cues[0].starts_with("1\n00:00:00,000 --> 00:00:02,500\n"));
    assert!(cues[2].starts_with("3\n00:02:10,000 --> 00:02:11,000\n"));
}

#[test]
fn artifacts_follow_the_output_directory_override() {
    let dir = tempfile::tempdir().expect("create temp dir");
    seed_tree(dir.path());
    let out_dir = dir.path().join("rendered");

    let files = resolve(&dir.path().join("alpha.wav"), false).expect("resolve single file");
    let job = job_over(files, Some(out_dir.clone()), false);
    let mut transcriber = ScriptedTranscriber { fail_on: None };

    let summary = run_batch(&mut transcriber, &job);

    assert!(summary.all_succeeded());
    assert!(out_dir.join("alpha.srt").exists());
    assert!(!dir.path().join("alpha.srt").exists());
}
