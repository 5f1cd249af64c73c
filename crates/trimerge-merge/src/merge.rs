//! Merge orchestration: resolve path and mode, run the engine once, and
//! package the result.

use std::path::Path;

use tracing::debug;
use trimerge_store::ContentStore;
use trimerge_types::{DiffFile, IndexEntry};
use trimerge_xdiff::{LineMerger, MergeParams, TextMerger};

use crate::error::MergeError;
use crate::input::MergeInput;
use crate::normalize::{normalize_from_diff_file, normalize_from_file, normalize_from_index_entry};
use crate::options::{MergeFavor, MergeFileOptions, MergeFlags};
use crate::resolve::{best_mode, best_path};
use crate::result::MergeResult;

/// Merge three normalized inputs.
///
/// If ours or theirs is absent, nothing is merged: the engine is not called
/// and the empty [`MergeResult::default`] is returned. Otherwise the path and
/// mode are resolved, the engine runs exactly once, and its buffer moves into
/// the result. An engine failure yields [`MergeError::Engine`] and no result.
pub fn merge_inputs(
    engine: &dyn TextMerger,
    ancestor: &MergeInput,
    ours: &MergeInput,
    theirs: &MergeInput,
    favor: MergeFavor,
    flags: MergeFlags,
) -> Result<MergeResult, MergeError> {
    if !ours.exists() || !theirs.exists() {
        debug!(
            ours = ours.exists(),
            theirs = theirs.exists(),
            "side absent; nothing to merge"
        );
        return Ok(MergeResult::default());
    }

    let path = best_path(ancestor, ours, theirs).map(str::to_owned);
    let mode = best_mode(ancestor, ours, theirs);
    debug!(path = ?path, %mode, "resolved path and mode");

    let params = MergeParams {
        ancestor_label: ancestor.label().map(str::to_owned),
        ours_label: ours.label().map(str::to_owned),
        theirs_label: theirs.label().map(str::to_owned),
        favor: favor.engine_favor(),
        level: flags.engine_level(),
        style: flags.engine_style(),
    };
    debug!(
        favor = ?params.favor,
        level = ?params.level,
        style = ?params.style,
        "invoking text merge"
    );

    let output = engine.merge(ancestor.data(), ours.data(), theirs.data(), &params)?;
    debug!(conflicts = output.conflicts, len = output.buffer.len(), "merge finished");

    Ok(MergeResult {
        path,
        mode,
        automergeable: output.conflicts == 0,
        conflicts: output.conflicts,
        data: Some(output.buffer),
    })
}

/// Merge three files from the file system.
///
/// Labels from `options` are used as given; unset ones fall back to the file
/// paths. The result path is only set when the paths agree per
/// [`best_path`], which for three distinct files means it is `None`.
pub fn merge_files(
    ancestor: impl AsRef<Path>,
    ours: impl AsRef<Path>,
    theirs: impl AsRef<Path>,
    options: &MergeFileOptions,
) -> Result<MergeResult, MergeError> {
    let ancestor = normalize_from_file(ancestor, options.ancestor_label.clone())?;
    let ours = normalize_from_file(ours, options.our_label.clone())?;
    let theirs = normalize_from_file(theirs, options.their_label.clone())?;

    merge_inputs(
        &LineMerger::default(),
        &ancestor,
        &ours,
        &theirs,
        options.favor,
        options.flags,
    )
}

/// Merge three index entries whose content lives in `store`.
///
/// Any entry may be absent (zero mode); see [`merge_inputs`] for what an
/// absent ours or theirs means.
pub fn merge_from_index(
    store: &dyn ContentStore,
    ancestor: &IndexEntry,
    ours: &IndexEntry,
    theirs: &IndexEntry,
    options: &MergeFileOptions,
) -> Result<MergeResult, MergeError> {
    let ancestor = normalize_from_index_entry(store, ancestor, options.ancestor_label.clone())?;
    let ours = normalize_from_index_entry(store, ours, options.our_label.clone())?;
    let theirs = normalize_from_index_entry(store, theirs, options.their_label.clone())?;

    merge_inputs(
        &LineMerger::default(),
        &ancestor,
        &ours,
        &theirs,
        options.favor,
        options.flags,
    )
}

/// Merge three sides of diff deltas whose content lives in `store`.
pub fn merge_from_diff_files(
    store: &dyn ContentStore,
    ancestor: &DiffFile,
    ours: &DiffFile,
    theirs: &DiffFile,
    options: &MergeFileOptions,
) -> Result<MergeResult, MergeError> {
    let ancestor = normalize_from_diff_file(store, ancestor, options.ancestor_label.clone())?;
    let ours = normalize_from_diff_file(store, ours, options.our_label.clone())?;
    let theirs = normalize_from_diff_file(store, theirs, options.their_label.clone())?;

    merge_inputs(
        &LineMerger::default(),
        &ancestor,
        &ours,
        &theirs,
        options.favor,
        options.flags,
    )
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use trimerge_store::InMemoryContentStore;
    use trimerge_types::{FileMode, ObjectId};
    use trimerge_xdiff::{EngineConfig, EngineResult, MergeOutput, MergedBuffer};

    use super::*;
    use crate::normalize::normalize_from_store;

    const ANCESTOR: &str = "0\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";
    const OURS: &str = "Zero\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n";
    const THEIRS: &str = "0\n1\n2\n3\n4\n5\n6\n7\n8\n9\nTen\n";
    const MERGED: &str = "Zero\n1\n2\n3\n4\n5\n6\n7\n8\n9\nTen\n";

    /// Delegates to the line merger and counts invocations.
    #[derive(Default)]
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl TextMerger for CountingEngine {
        fn merge(
            &self,
            ancestor: &[u8],
            ours: &[u8],
            theirs: &[u8],
            params: &MergeParams,
        ) -> EngineResult<MergeOutput> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            LineMerger::default().merge(ancestor, ours, theirs, params)
        }
    }

    /// Ignores its inputs and reports a fixed output.
    struct CannedEngine {
        output: &'static [u8],
        conflicts: usize,
    }

    impl TextMerger for CannedEngine {
        fn merge(
            &self,
            _ancestor: &[u8],
            _ours: &[u8],
            _theirs: &[u8],
            _params: &MergeParams,
        ) -> EngineResult<MergeOutput> {
            Ok(MergeOutput {
                buffer: MergedBuffer::new(self.output.to_vec()),
                conflicts: self.conflicts,
            })
        }
    }

    fn write_files(dir: &Path, ancestor: &str, ours: &str, theirs: &str) -> [std::path::PathBuf; 3] {
        let paths = [
            dir.join("file1.txt"),
            dir.join("file2.txt"),
            dir.join("file3.txt"),
        ];
        for (path, content) in paths.iter().zip([ancestor, ours, theirs]) {
            std::fs::write(path, content).unwrap();
        }
        paths
    }

    fn stored(store: &InMemoryContentStore, path: &str, mode: FileMode, content: &str) -> IndexEntry {
        let id = store.insert_blob(content.as_bytes().to_vec());
        IndexEntry::new(path, id, mode, content.len() as u64)
    }

    // -----------------------------------------------------------------------
    // From files
    // -----------------------------------------------------------------------

    #[test]
    fn automerge_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), ANCESTOR, OURS, THEIRS);

        let mut result = merge_files(&a, &o, &t, &MergeFileOptions::default()).unwrap();
        assert!(result.automergeable);
        assert_eq!(result.path, None);
        assert_eq!(result.mode, FileMode::BLOB);
        assert_eq!(result.data(), Some(MERGED.as_bytes()));
        assert_eq!(result.len(), MERGED.len());
        assert!(result.release());
    }

    #[test]
    fn conflict_from_files_uses_option_labels() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), "a\nb\nc\n", "a\nours\nc\n", "a\ntheirs\nc\n");
        let options = MergeFileOptions {
            our_label: Some("HEAD".into()),
            their_label: Some("feature".into()),
            ..Default::default()
        };

        let result = merge_files(&a, &o, &t, &options).unwrap();
        assert!(!result.automergeable);
        assert_eq!(result.conflicts, 1);
        assert_eq!(
            result.data().unwrap(),
            b"a\n<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>> feature\nc\n"
        );
    }

    #[test]
    fn conflict_labels_default_to_paths() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), "a\nb\nc\n", "a\nours\nc\n", "a\ntheirs\nc\n");
        let options = MergeFileOptions {
            flags: MergeFlags {
                style_diff3: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = merge_files(&a, &o, &t, &options).unwrap();
        let text = String::from_utf8(result.data().unwrap().to_vec()).unwrap();
        assert!(text.contains(&format!("<<<<<<< {}\n", o.display())));
        assert!(text.contains(&format!("||||||| {}\nb\n", a.display())));
        assert!(text.contains(&format!(">>>>>>> {}\n", t.display())));
    }

    #[test]
    fn favor_union_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), "a\nb\nc\n", "a\nours\nc\n", "a\ntheirs\nc\n");
        let options = MergeFileOptions {
            favor: MergeFavor::Union,
            ..Default::default()
        };

        let result = merge_files(&a, &o, &t, &options).unwrap();
        assert!(result.automergeable);
        assert_eq!(result.data().unwrap(), b"a\nours\ntheirs\nc\n");
    }

    #[test]
    fn missing_file_aborts_the_merge() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, _] = write_files(dir.path(), ANCESTOR, OURS, THEIRS);
        let missing = dir.path().join("missing.txt");

        let err = merge_files(&a, &o, &missing, &MergeFileOptions::default()).unwrap_err();
        assert!(matches!(err, MergeError::Io { path, .. } if path == missing));
    }

    #[test]
    fn identical_content_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), ANCESTOR, ANCESTOR, ANCESTOR);

        let result = merge_files(&a, &o, &t, &MergeFileOptions::default()).unwrap();
        assert!(result.automergeable);
        assert_eq!(result.data(), Some(ANCESTOR.as_bytes()));
    }

    // -----------------------------------------------------------------------
    // From the store
    // -----------------------------------------------------------------------

    #[test]
    fn automerge_from_index_with_rename_and_mode_change() {
        let store = InMemoryContentStore::new();
        let ancestor = stored(&store, "automergeable.txt", FileMode::BLOB, ANCESTOR);
        let ours = stored(&store, "automergeable.txt", FileMode::BLOB_EXECUTABLE, OURS);
        let theirs = stored(&store, "newname.txt", FileMode::BLOB, THEIRS);

        let result =
            merge_from_index(&store, &ancestor, &ours, &theirs, &MergeFileOptions::default())
                .unwrap();
        assert!(result.automergeable);
        assert_eq!(result.path.as_deref(), Some("newname.txt"));
        assert_eq!(result.mode, FileMode::BLOB_EXECUTABLE);
        assert_eq!(result.data(), Some(MERGED.as_bytes()));
        assert_eq!(result.len(), MERGED.len());
    }

    #[test]
    fn merge_from_diff_files_matches_index_merge() {
        let store = InMemoryContentStore::new();
        let ancestor = DiffFile::from(stored(&store, "f.txt", FileMode::BLOB, ANCESTOR));
        let ours = DiffFile::from(stored(&store, "f.txt", FileMode::BLOB, OURS));
        let theirs = DiffFile::from(stored(&store, "f.txt", FileMode::BLOB, THEIRS));

        let result =
            merge_from_diff_files(&store, &ancestor, &ours, &theirs, &MergeFileOptions::default())
                .unwrap();
        assert!(result.automergeable);
        assert_eq!(result.path.as_deref(), Some("f.txt"));
        assert_eq!(result.mode, FileMode::BLOB);
        assert_eq!(result.data(), Some(MERGED.as_bytes()));
    }

    #[test]
    fn add_add_without_ancestor() {
        let store = InMemoryContentStore::new();
        let ancestor = IndexEntry::absent("new.sh");
        let ours = stored(&store, "new.sh", FileMode::BLOB, "echo hi\n");
        let theirs = stored(&store, "new.sh", FileMode::BLOB_EXECUTABLE, "echo hi\n");

        let result =
            merge_from_index(&store, &ancestor, &ours, &theirs, &MergeFileOptions::default())
                .unwrap();
        assert!(result.automergeable);
        assert_eq!(result.path.as_deref(), Some("new.sh"));
        assert_eq!(result.mode, FileMode::BLOB_EXECUTABLE);
        assert_eq!(result.data(), Some(&b"echo hi\n"[..]));
    }

    #[test]
    fn failed_normalization_releases_earlier_inputs() {
        let store = InMemoryContentStore::new();
        let ancestor = stored(&store, "f.txt", FileMode::BLOB, ANCESTOR);
        let ours = stored(&store, "f.txt", FileMode::BLOB, OURS);
        let missing = ObjectId::for_blob(b"not in the store");
        let theirs = IndexEntry::new("f.txt", missing, FileMode::BLOB, 0);

        let err = merge_from_index(&store, &ancestor, &ours, &theirs, &MergeFileOptions::default())
            .unwrap_err();
        assert!(matches!(err, MergeError::NotFound(id) if id == missing));

        // Only the store's own reference remains for the records that were
        // borrowed before the failure.
        for entry in [&ancestor, &ours] {
            let record = store.read_required(&entry.id).unwrap();
            assert_eq!(Arc::strong_count(&record), 2);
        }
    }

    // -----------------------------------------------------------------------
    // Orchestration contract
    // -----------------------------------------------------------------------

    #[test]
    fn absent_side_short_circuits_without_engine() {
        let store = InMemoryContentStore::new();
        let id = store.insert_blob(ANCESTOR.as_bytes().to_vec());
        let present = normalize_from_store(&store, &id, "f.txt", FileMode::BLOB, None).unwrap();
        let absent = MergeInput::absent();
        let engine = CountingEngine::default();

        for (ours, theirs) in [(&absent, &present), (&present, &absent), (&absent, &absent)] {
            let mut result = merge_inputs(
                &engine,
                &present,
                ours,
                theirs,
                MergeFavor::Normal,
                MergeFlags::default(),
            )
            .unwrap();
            assert!(!result.is_merged());
            assert!(result.path.is_none());
            assert!(result.mode.is_absent());
            assert!(!result.automergeable);
            assert_eq!(result.len(), 0);
            assert!(!result.release());
        }
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn engine_runs_exactly_once() {
        let store = InMemoryContentStore::new();
        let a = stored(&store, "f.txt", FileMode::BLOB, ANCESTOR);
        let o = stored(&store, "f.txt", FileMode::BLOB, OURS);
        let t = stored(&store, "f.txt", FileMode::BLOB, THEIRS);
        let ancestor = normalize_from_index_entry(&store, &a, None).unwrap();
        let ours = normalize_from_index_entry(&store, &o, None).unwrap();
        let theirs = normalize_from_index_entry(&store, &t, None).unwrap();
        let engine = CountingEngine::default();

        let result = merge_inputs(
            &engine,
            &ancestor,
            &ours,
            &theirs,
            MergeFavor::Normal,
            MergeFlags::default(),
        )
        .unwrap();
        assert!(result.is_merged());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn engine_output_passes_through() {
        let store = InMemoryContentStore::new();
        let a = stored(&store, "f.txt", FileMode::BLOB, ANCESTOR);
        let ancestor = normalize_from_index_entry(&store, &a, None).unwrap();
        let engine = CannedEngine {
            output: b"<<<<<<< x\n=======\n>>>>>>> y\n",
            conflicts: 2,
        };

        let mut result = merge_inputs(
            &engine,
            &ancestor,
            &ancestor,
            &ancestor,
            MergeFavor::Normal,
            MergeFlags::default(),
        )
        .unwrap();
        assert!(!result.automergeable);
        assert_eq!(result.conflicts, 2);
        assert_eq!(result.data(), Some(engine.output));
        assert_eq!(result.path.as_deref(), Some("f.txt"));
        assert!(result.release());
    }

    #[test]
    fn engine_failure_is_an_error() {
        let store = InMemoryContentStore::new();
        let a = stored(&store, "f.txt", FileMode::BLOB, ANCESTOR);
        let ancestor = normalize_from_index_entry(&store, &a, None).unwrap();
        let engine = LineMerger::new(EngineConfig { max_input_size: 8 });

        let err = merge_inputs(
            &engine,
            &ancestor,
            &ancestor,
            &ancestor,
            MergeFavor::Normal,
            MergeFlags::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MergeError::Engine(_)));
    }

    #[test]
    fn result_outlives_its_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let [a, o, t] = write_files(dir.path(), ANCESTOR, OURS, THEIRS);
        let mut ancestor = normalize_from_file(&a, None).unwrap();
        let mut ours = normalize_from_file(&o, None).unwrap();
        let mut theirs = normalize_from_file(&t, None).unwrap();

        let mut result = merge_inputs(
            &LineMerger::default(),
            &ancestor,
            &ours,
            &theirs,
            MergeFavor::Normal,
            MergeFlags::default(),
        )
        .unwrap();

        for input in [&mut ancestor, &mut ours, &mut theirs] {
            assert!(input.release());
            assert!(!input.release());
        }
        assert_eq!(result.data(), Some(MERGED.as_bytes()));
        assert!(result.release());
        assert!(!result.release());
        assert!(result.data().is_none());
    }

    #[test]
    fn independent_merges_run_concurrently() {
        let store = Arc::new(InMemoryContentStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let path = format!("file{i}.txt");
                    let a = stored(&store, &path, FileMode::BLOB, ANCESTOR);
                    let o = stored(&store, &path, FileMode::BLOB, OURS);
                    let t = stored(&store, &path, FileMode::BLOB, THEIRS);
                    let result =
                        merge_from_index(&*store, &a, &o, &t, &MergeFileOptions::default())
                            .unwrap();
                    assert_eq!(result.path.as_deref(), Some(path.as_str()));
                    assert_eq!(result.data(), Some(MERGED.as_bytes()));
                })
            })
            .collect();

        for h in handles {
            h.join().expect("thread should not panic");
        }
    }
}
