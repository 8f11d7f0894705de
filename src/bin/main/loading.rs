use std::path::Path;

use lexis_core::{Corpus, FontSet, FontSetConfig, FsStore};
use log::info;

/// Everything the preview needs from disk.
pub(super) struct Assets {
    pub(super) fonts: FontSet,
    pub(super) corpus: Corpus,
}

/// Loads every font of the set from `font_dir` and the corpus at
/// `corpus_path`, then applies the requested family and zoom.
pub(super) fn load_assets(
    font_dir: &Path,
    corpus_path: &Path,
    family: usize,
    zoom: usize,
) -> Result<Assets, String> {
    let font_store = FsStore::new(font_dir);
    let mut fonts = FontSet::load(&font_store, FontSetConfig::default())
        .map_err(|err| format!("font set in {}: {}", font_dir.display(), err))?;
    fonts.select_family(family);
    fonts.select_zoom(zoom);

    let (corpus_root, corpus_name) = split_path(corpus_path)?;
    let corpus = Corpus::load(&FsStore::new(corpus_root), corpus_name)
        .map_err(|err| format!("corpus {}: {}", corpus_path.display(), err))?;

    info!(
        "assets ready: {} {}px, {} books",
        fonts.family_name(),
        fonts.zoom_size(),
        corpus.book_count()
    );
    Ok(Assets { fonts, corpus })
}

/// Store root and store-relative name for a file path.
fn split_path(path: &Path) -> Result<(&Path, &str), String> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| format!("not a file path: {}", path.display()))?;
    let root = path.parent().unwrap_or_else(|| Path::new(""));
    Ok((root, name))
}
