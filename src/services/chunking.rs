use regex::Regex;

use crate::dto::chunk::Chunk;
use crate::dto::ordered_map::OrderedMap;
use crate::dto::strategy::{ParamValue, StrategyCatalog, StrategyDescriptor};

/// Default delimiter for `regex_delimiter`: one blank line or more.
pub const DEFAULT_DELIMITER: &str = r"\n\n+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Fixed,
    Sentence,
    Paragraph,
    SlidingWindow,
    RegexDelimiter,
}

impl Strategy {
    /// Catalog order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Fixed,
        Strategy::Sentence,
        Strategy::Paragraph,
        Strategy::SlidingWindow,
        Strategy::RegexDelimiter,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Strategy::Fixed => "fixed",
            Strategy::Sentence => "sentence",
            Strategy::Paragraph => "paragraph",
            Strategy::SlidingWindow => "sliding_window",
            Strategy::RegexDelimiter => "regex_delimiter",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Fixed => "Fixed-size (by words)",
            Strategy::Sentence => "Sentence-based",
            Strategy::Paragraph => "Paragraph-based",
            Strategy::SlidingWindow => "Sliding Window (by words)",
            Strategy::RegexDelimiter => "Regex Delimiter",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Strategy::Fixed => "Splits text into chunks of N words, optionally with overlap.",
            Strategy::Sentence => {
                "Splits text into chunks of N sentences, optionally with overlap."
            }
            Strategy::Paragraph => {
                "Splits text into chunks of N paragraphs, optionally with overlap."
            }
            Strategy::SlidingWindow => {
                "Splits text into overlapping windows of N words (good for context preservation)."
            }
            Strategy::RegexDelimiter => {
                "Splits text using a custom regex delimiter (e.g., double newlines, headings, etc)."
            }
        }
    }

    pub fn default_size(self) -> usize {
        match self {
            Strategy::Fixed => 500,
            Strategy::Sentence => 5,
            Strategy::Paragraph => 2,
            Strategy::SlidingWindow => 100,
            Strategy::RegexDelimiter => 1,
        }
    }

    pub fn default_overlap(self) -> usize {
        match self {
            Strategy::SlidingWindow => 50,
            _ => 0,
        }
    }

    pub fn descriptor(self) -> StrategyDescriptor {
        let mut params = OrderedMap::new();
        if self == Strategy::RegexDelimiter {
            params.insert("pattern", ParamValue::Text(DEFAULT_DELIMITER.to_string()));
        }
        params.insert("size", ParamValue::Number(self.default_size() as u64));
        params.insert("overlap", ParamValue::Number(self.default_overlap() as u64));

        StrategyDescriptor {
            name: self.name().to_string(),
            explanation: self.explanation().to_string(),
            params,
        }
    }
}

/// Every strategy keyed by its wire name.
pub fn catalog() -> StrategyCatalog {
    Strategy::ALL
        .into_iter()
        .map(|s| (s.key(), s.descriptor()))
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    #[error("Parameter '{name}' must be a non-negative integer, got '{value}'")]
    InvalidNumber { name: String, value: String },

    #[error("Size must be at least 1")]
    ZeroSize,

    #[error("Overlap ({overlap}) must be smaller than size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChunkParams {
    pub size: usize,
    pub overlap: usize,
    pub pattern: Option<String>,
}

impl ChunkParams {
    pub fn defaults(strategy: Strategy) -> Self {
        Self {
            size: strategy.default_size(),
            overlap: strategy.default_overlap(),
            pattern: (strategy == Strategy::RegexDelimiter).then(|| DEFAULT_DELIMITER.to_string()),
        }
    }

    /// Builds parameters from raw form fields. Missing fields take the
    /// strategy's defaults; unknown fields are ignored.
    pub fn from_fields(strategy: Strategy, fields: &OrderedMap<String>) -> Result<Self, ChunkingError> {
        let mut params = Self::defaults(strategy);
        if let Some(raw) = fields.get("size") {
            params.size = parse_count("size", raw)?;
        }
        if let Some(raw) = fields.get("overlap") {
            params.overlap = parse_count("overlap", raw)?;
        }
        if strategy == Strategy::RegexDelimiter {
            if let Some(raw) = fields.get("pattern") {
                params.pattern = Some(raw.clone());
            }
        }
        Ok(params)
    }

    fn validate(&self) -> Result<(), ChunkingError> {
        if self.size == 0 {
            return Err(ChunkingError::ZeroSize);
        }
        if self.overlap >= self.size {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: self.overlap,
                size: self.size,
            });
        }
        Ok(())
    }
}

fn parse_count(name: &str, raw: &str) -> Result<usize, ChunkingError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| ChunkingError::InvalidNumber {
            name: name.to_string(),
            value: raw.to_string(),
        })
}

pub fn chunk(strategy: Strategy, text: &str, params: &ChunkParams) -> Result<Vec<Chunk>, ChunkingError> {
    params.validate()?;

    let delimiter = match strategy {
        Strategy::RegexDelimiter => Some(Regex::new(
            params.pattern.as_deref().unwrap_or(DEFAULT_DELIMITER),
        )?),
        _ => None,
    };

    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let chunks = match (strategy, delimiter) {
        (Strategy::RegexDelimiter, Some(re)) => {
            let pieces: Vec<&str> = re.split(text).collect();
            window(&pieces, params, "\n\n", false)
                .into_iter()
                .map(|c| Chunk {
                    pattern: Some(re.as_str().to_string()),
                    ..c
                })
                .collect()
        }
        (Strategy::Sentence, _) => window(&sentences(text), params, " ", false),
        (Strategy::Paragraph, _) => window(&paragraphs(text), params, "\n\n", false),
        (Strategy::SlidingWindow, _) => window(&words(text), params, " ", true),
        _ => window(&words(text), params, " ", false),
    };

    tracing::debug!(
        strategy = strategy.key(),
        size = params.size,
        overlap = params.overlap,
        chunks = chunks.len(),
        "Chunked text"
    );

    Ok(chunks)
}

/// Slides a window of `size` units over `units`, advancing by
/// `size - overlap` (or `size` without overlap). With `stop_on_short` the
/// first window shorter than `size` is the last one.
fn window(units: &[&str], params: &ChunkParams, joiner: &str, stop_on_short: bool) -> Vec<Chunk> {
    let step = if params.overlap > 0 {
        params.size - params.overlap
    } else {
        params.size
    };

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < units.len() {
        let end = start.saturating_add(params.size).min(units.len());
        let taken = &units[start..end];
        chunks.push(Chunk {
            text: taken.join(joiner),
            start,
            end,
            size: taken.len(),
            overlap: params.overlap,
            pattern: None,
        });

        if stop_on_short && taken.len() < params.size {
            break;
        }
        start = start.saturating_add(step);
    }
    chunks
}

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Splits after `.`, `!` or `?` when followed by a run of spaces.
fn sentences(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') && bytes.get(i + 1) == Some(&b' ') {
            out.push(&text[start..=i]);
            i += 1;
            while bytes.get(i) == Some(&b' ') {
                i += 1;
            }
            start = i;
            continue;
        }
        i += 1;
    }

    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_words(n: usize) -> String {
        (0..n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    fn params(size: usize, overlap: usize) -> ChunkParams {
        ChunkParams {
            size,
            overlap,
            pattern: None,
        }
    }

    #[test]
    fn test_catalog_order_and_defaults() {
        let catalog = catalog();
        assert_eq!(
            catalog.keys().collect::<Vec<_>>(),
            vec!["fixed", "sentence", "paragraph", "sliding_window", "regex_delimiter"]
        );

        let sliding = catalog.get("sliding_window").unwrap();
        assert_eq!(sliding.params.get("size"), Some(&ParamValue::Number(100)));
        assert_eq!(sliding.params.get("overlap"), Some(&ParamValue::Number(50)));

        let regex = catalog.get("regex_delimiter").unwrap();
        assert_eq!(
            regex.params.keys().collect::<Vec<_>>(),
            vec!["pattern", "size", "overlap"]
        );
    }

    #[test]
    fn test_fixed_without_overlap() {
        let chunks = chunk(Strategy::Fixed, &numbered_words(10), &params(4, 0)).unwrap();
        let sizes: Vec<usize> = chunks.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
        assert_eq!(chunks[0].text, "w0 w1 w2 w3");
        assert_eq!((chunks[2].start, chunks[2].end), (8, 10));
    }

    #[test]
    fn test_fixed_with_overlap_keeps_tail_windows() {
        let chunks = chunk(Strategy::Fixed, &numbered_words(10), &params(4, 2)).unwrap();
        let starts: Vec<usize> = chunks.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 2, 4, 6, 8]);
        assert!(chunks.iter().all(|c| c.overlap == 2));
        assert_eq!(chunks[4].text, "w8 w9");
    }

    #[test]
    fn test_sliding_window_stops_after_short_window() {
        let sliding = chunk(Strategy::SlidingWindow, &numbered_words(9), &params(4, 3)).unwrap();
        let starts: Vec<usize> = sliding.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(sliding.last().unwrap().size, 3);

        let fixed = chunk(Strategy::Fixed, &numbered_words(9), &params(4, 3)).unwrap();
        assert_eq!(fixed.len(), 9);
        assert_eq!(fixed.last().unwrap().text, "w8");
    }

    #[test]
    fn test_sentence_split() {
        let text = "One. Two!  Three? Four.Five six";
        assert_eq!(sentences(text), vec!["One.", "Two!", "Three?", "Four.Five six"]);

        let chunks = chunk(Strategy::Sentence, text, &params(2, 0)).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "One. Two!");
        assert_eq!(chunks[1].text, "Three? Four.Five six");
    }

    #[test]
    fn test_paragraphs_skip_blank_lines() {
        let text = "first\n\n  second  \n\n\nthird\n";
        let chunks = chunk(Strategy::Paragraph, text, &params(2, 0)).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "first\n\nsecond");
        assert_eq!(chunks[1].text, "third");
    }

    #[test]
    fn test_regex_delimiter_default_pattern() {
        let text = "alpha\n\nbeta\n\n\n\ngamma";
        let chunks = chunk(
            Strategy::RegexDelimiter,
            text,
            &ChunkParams::defaults(Strategy::RegexDelimiter),
        )
        .unwrap();
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
        assert!(chunks.iter().all(|c| c.pattern.as_deref() == Some(DEFAULT_DELIMITER)));
    }

    #[test]
    fn test_regex_delimiter_custom_pattern() {
        let p = ChunkParams {
            size: 2,
            overlap: 0,
            pattern: Some("#+ ".to_string()),
        };
        let chunks = chunk(Strategy::RegexDelimiter, "a# b## c", &p).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a\n\nb");
        assert_eq!(chunks[1].text, "c");
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let p = ChunkParams {
            size: 1,
            overlap: 0,
            pattern: Some("(".to_string()),
        };
        assert!(matches!(
            chunk(Strategy::RegexDelimiter, "text", &p),
            Err(ChunkingError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_degenerate_windows_rejected() {
        assert!(matches!(
            chunk(Strategy::Fixed, "a b", &params(0, 0)),
            Err(ChunkingError::ZeroSize)
        ));
        assert!(matches!(
            chunk(Strategy::Fixed, "a b", &params(3, 3)),
            Err(ChunkingError::OverlapTooLarge { overlap: 3, size: 3 })
        ));
    }

    #[test]
    fn test_trailing_sentence_separator_adds_no_empty_sentence() {
        assert_eq!(sentences("Done. "), vec!["Done."]);
        let chunks = chunk(Strategy::Sentence, "One. Two. ", &params(1, 0)).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "Two.");
    }

    #[test]
    fn test_huge_window_does_not_overflow() {
        let fields: OrderedMap<String> = [
            ("size", usize::MAX.to_string()),
            ("overlap", (usize::MAX - 1).to_string()),
        ]
        .into_iter()
        .collect();
        let p = ChunkParams::from_fields(Strategy::Fixed, &fields).unwrap();

        let fixed = chunk(Strategy::Fixed, "a b c", &p).unwrap();
        let starts: Vec<usize> = fixed.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 1, 2]);
        assert_eq!(fixed[0].text, "a b c");
        assert!(fixed.iter().all(|c| c.end == 3));

        let sliding = chunk(Strategy::SlidingWindow, "a b c", &p).unwrap();
        assert_eq!(sliding.len(), 1);

        let no_overlap = ChunkParams {
            size: usize::MAX,
            overlap: 0,
            pattern: None,
        };
        let fixed = chunk(Strategy::Fixed, "a b c", &no_overlap).unwrap();
        assert_eq!(fixed.len(), 1);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        for strategy in Strategy::ALL {
            let chunks = chunk(strategy, "  \n ", &ChunkParams::defaults(strategy)).unwrap();
            assert!(chunks.is_empty(), "{strategy:?} produced chunks");
        }
    }

    #[test]
    fn test_params_from_fields() {
        let fields: OrderedMap<String> = [("size", "7".to_string()), ("extra", "x".to_string())]
            .into_iter()
            .collect();
        let p = ChunkParams::from_fields(Strategy::SlidingWindow, &fields).unwrap();
        assert_eq!(p.size, 7);
        assert_eq!(p.overlap, 50);
        assert_eq!(p.pattern, None);

        let bad: OrderedMap<String> = [("overlap", "-1".to_string())].into_iter().collect();
        assert!(matches!(
            ChunkParams::from_fields(Strategy::Fixed, &bad),
            Err(ChunkingError::InvalidNumber { .. })
        ));
    }
}
