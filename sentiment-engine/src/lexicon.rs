//! Token Store Loader - compiles stored polarity rules into matchers

use crate::normalize::normalize;
use common::{MatchKind, Polarity, TokenRuleRecord};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

const DEFAULT_WEIGHT: f64 = 1.0;

#[derive(Debug, Clone)]
enum MatchTest {
    /// Normalized needle, tested against normalized text
    Literal(String),
    Pattern(Regex),
}

/// A compiled polarity token
#[derive(Debug, Clone)]
pub struct Matcher {
    pub polarity: Polarity,
    pub kind: MatchKind,
    /// Pattern as stored, reported in hits
    pub pattern: String,
    /// Signed contribution; negative for negative tokens
    pub weight: f64,
    pub note: String,
    test: MatchTest,
}

impl Matcher {
    /// Test against already-normalized text
    pub fn matches(&self, normalized_text: &str) -> bool {
        match &self.test {
            MatchTest::Literal(needle) => normalized_text.contains(needle.as_str()),
            MatchTest::Pattern(re) => re.is_match(normalized_text),
        }
    }

    /// Identity used to count a rule once per text
    ///
    /// Literals fold case; regex sources are kept verbatim since case changes their meaning.
    pub fn dedupe_key(&self) -> (String, String) {
        let pattern = match &self.test {
            MatchTest::Literal(needle) => needle.clone(),
            MatchTest::Pattern(_) => self.pattern.clone(),
        };
        (pattern, self.note.clone())
    }
}

/// Compiled positive and negative matchers, in store order
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub positive: Vec<Matcher>,
    pub negative: Vec<Matcher>,
    /// Rules rejected as malformed during the load
    pub skipped: usize,
}

impl Lexicon {
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Positive matchers first, then negative
    pub fn iter(&self) -> impl Iterator<Item = &Matcher> {
        self.positive.iter().chain(self.negative.iter())
    }
}

/// Compile rule records, skipping any that are malformed
pub fn load_matchers(records: &[TokenRuleRecord]) -> Lexicon {
    let mut lexicon = Lexicon::default();

    for (i, record) in records.iter().enumerate() {
        match compile(record) {
            Ok(matcher) => match matcher.polarity {
                Polarity::Positive => lexicon.positive.push(matcher),
                Polarity::Negative => lexicon.negative.push(matcher),
            },
            Err(reason) => {
                let id = record.id.clone().unwrap_or_else(|| format!("#{}", i));
                warn!("Skipping token rule {}: {}", id, reason);
                lexicon.skipped += 1;
            }
        }
    }

    debug!(
        "Loaded {} positive / {} negative tokens ({} skipped)",
        lexicon.positive.len(),
        lexicon.negative.len(),
        lexicon.skipped
    );
    lexicon
}

fn compile(record: &TokenRuleRecord) -> Result<Matcher, String> {
    let polarity: Polarity = record
        .polarity
        .as_deref()
        .ok_or("missing polarity")?
        .parse()?;
    let kind: MatchKind = match record.kind.as_deref() {
        Some(kind) => kind.parse()?,
        None => MatchKind::Literal,
    };

    let pattern = record.pattern.clone().unwrap_or_default();
    if pattern.trim().is_empty() {
        return Err("empty pattern".to_string());
    }

    let weight = record.weight.unwrap_or(DEFAULT_WEIGHT);
    if !weight.is_finite() {
        return Err(format!("non-finite weight {}", weight));
    }

    let test = match kind {
        MatchKind::Literal => MatchTest::Literal(normalize(&pattern)),
        MatchKind::Pattern => MatchTest::Pattern(
            RegexBuilder::new(&pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| format!("invalid pattern: {}", e))?,
        ),
    };

    Ok(Matcher {
        polarity,
        kind,
        weight: polarity.signed(weight),
        pattern,
        note: record.note.clone().unwrap_or_default(),
        test,
    })
}
