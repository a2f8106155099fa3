use icu_segmenter::GraphemeClusterSegmenter;

use crate::text::normalize::normalize;

/// Normalize `text` and split it into extended grapheme clusters.
pub fn segment(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    clusters(&normalized).into_iter().map(str::to_owned).collect()
}

pub fn grapheme_count(text: &str) -> usize {
    clusters(&normalize(text)).len()
}

/// Cluster slices of an already-normalized string.
pub(crate) fn clusters(text: &str) -> Vec<&str> {
    let breaks: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
    breaks
        .windows(2)
        .map(|pair| &text[pair[0]..pair[1]])
        .filter(|cluster| !cluster.is_empty())
        .collect()
}
