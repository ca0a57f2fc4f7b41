//! Token feed loading.
//!
//! A feed is a RON list of [`Token`]s. Without a feed file the client falls
//! back to a small built-in deck so it can run out of the box.
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use deck_core::{Item, ItemSource, cycling};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::config::FeedConfig;

/// Payload shown on each card.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub blurb: String,
}

impl Token {
    pub fn new(symbol: &str, name: &str, blurb: &str) -> Self {
        Self {
            symbol: symbol.to_owned(),
            name: name.to_owned(),
            blurb: blurb.to_owned(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read feed {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("feed {0} contains no tokens")]
    Empty(PathBuf),
}

pub type FeedSource = Box<dyn Iterator<Item = Item<Token>>>;

/// Tokens backing one deck session, kept so the deck can be restarted.
#[derive(Clone, Debug)]
pub struct Feed {
    items: Vec<Item<Token>>,
    wrap: bool,
}

impl Feed {
    pub fn load(config: &FeedConfig) -> Result<Self, FeedError> {
        let tokens = match &config.path {
            Some(path) => read_tokens(path)?,
            None => demo_tokens(),
        };
        info!(count = tokens.len(), wrap = config.wrap, "feed loaded");
        Ok(Self::from_tokens(tokens, config.wrap))
    }

    pub fn from_tokens(tokens: Vec<Token>, wrap: bool) -> Self {
        Self {
            items: to_items(tokens),
            wrap,
        }
    }

    /// Fresh source over the whole feed, cycling forever when wrapping.
    pub fn source(&self) -> FeedSource {
        if self.wrap {
            let mut lap = cycling(self.items.clone());
            Box::new(std::iter::from_fn(move || lap.next_item()))
        } else {
            Box::new(self.items.clone().into_iter())
        }
    }
}

pub fn read_tokens(path: &Path) -> Result<Vec<Token>, FeedError> {
    let text = fs::read_to_string(path).map_err(|source| FeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens: Vec<Token> = ron::from_str(&text).map_err(|source| FeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    if tokens.is_empty() {
        return Err(FeedError::Empty(path.to_path_buf()));
    }
    Ok(tokens)
}

/// Assigns each token an id derived from its symbol, suffixed on collision.
fn to_items(tokens: Vec<Token>) -> Vec<Item<Token>> {
    let mut seen = HashSet::new();
    tokens
        .into_iter()
        .map(|token| {
            let base = token.symbol.to_lowercase();
            let mut id = base.clone();
            let mut suffix = 2;
            while !seen.insert(id.clone()) {
                id = format!("{base}-{suffix}");
                suffix += 1;
            }
            Item::new(id, token)
        })
        .collect()
}

pub fn demo_tokens() -> Vec<Token> {
    vec![
        Token::new("BONK", "Bonk", "Dog-themed community token."),
        Token::new("WIF", "dogwifhat", "A dog. With a hat."),
        Token::new("JUP", "Jupiter", "Governance token of a swap aggregator."),
        Token::new("PYTH", "Pyth Network", "Oracle network publishing price feeds."),
        Token::new("RAY", "Raydium", "Automated market maker and liquidity provider."),
        Token::new("ORCA", "Orca", "Concentrated liquidity exchange."),
        Token::new("MNDE", "Marinade", "Liquid staking governance token."),
        Token::new("POPCAT", "Popcat", "Cat that pops. That is the whole pitch."),
    ]
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn drain(source: FeedSource, limit: usize) -> Vec<String> {
        source
            .take(limit)
            .map(|item| item.id.to_string())
            .collect()
    }

    #[test]
    fn reads_ron_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[
                (symbol: "AAA", name: "Alpha", blurb: "first"),
                (symbol: "BBB", name: "Beta"),
            ]"#
        )
        .unwrap();

        let tokens = read_tokens(file.path()).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0], Token::new("AAA", "Alpha", "first"));
        assert_eq!(tokens[1].blurb, "");
    }

    #[test]
    fn empty_feed_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[]").unwrap();
        assert!(matches!(
            read_tokens(file.path()),
            Err(FeedError::Empty(_))
        ));
    }

    #[test]
    fn malformed_feed_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[(symbol: 42)]").unwrap();
        assert!(matches!(
            read_tokens(file.path()),
            Err(FeedError::Parse { .. })
        ));
    }

    #[test]
    fn missing_feed_reports_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.ron");
        assert!(matches!(read_tokens(&path), Err(FeedError::Read { .. })));
    }

    #[test]
    fn duplicate_symbols_get_distinct_ids() {
        let feed = Feed::from_tokens(
            vec![
                Token::new("DUP", "One", ""),
                Token::new("dup", "Two", ""),
                Token::new("DUP", "Three", ""),
            ],
            false,
        );
        assert_eq!(drain(feed.source(), 10), ["dup", "dup-2", "dup-3"]);
    }

    #[test]
    fn wrapping_feed_repeats() {
        let feed = Feed::from_tokens(
            vec![Token::new("A", "A", ""), Token::new("B", "B", "")],
            true,
        );
        assert_eq!(drain(feed.source(), 5), ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn demo_feed_loads_without_path() {
        let feed = Feed::load(&FeedConfig::default()).unwrap();
        assert_eq!(feed.source().count(), demo_tokens().len());
    }
}
