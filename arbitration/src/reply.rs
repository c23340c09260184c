//! Free-text model reply to a `FinalCall`

use crate::error::ArbitrationError;
use common::{FinalCall, Trend};
use lazy_static::lazy_static;
use regex::Regex;

const EXCERPT_CHARS: usize = 80;

lazy_static! {
    /// `Trend: <label>` on its own line, tolerating markdown bullets and bold
    static ref TREND_LINE: Regex = Regex::new(
        r"(?im)^[\s>*#-]*(?:trend|prediction|趨勢|預測)[\s*]*[:：][\s*]*(?P<label>(?:slight(?:ly)?[\s_-]*up|slight(?:ly)?[\s_-]*down|up|down|unclear)\b|微漲|微跌|上漲|下跌|不明確)"
    )
    .unwrap();

    /// Any vocabulary term; the slight forms come first so they win at the same position
    static ref TERM: Regex = Regex::new(
        r"(?i)(?P<label>\bslight(?:ly)?[\s_-]*up\b|\bslight(?:ly)?[\s_-]*down\b|\bup\b|\bdown\b|\bunclear\b|微漲|微跌|上漲|下跌|不明確)"
    )
    .unwrap();

    static ref REASON: Regex = Regex::new(r"(?is)(?:reason|理由|原因)[\s*]*[:：](?P<text>.*)").unwrap();
}

fn label_to_trend(label: &str) -> Option<Trend> {
    let key: String = label
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_lowercase();
    match key.as_str() {
        "up" | "上漲" => Some(Trend::Up),
        "slightup" | "slightlyup" | "微漲" => Some(Trend::SlightUp),
        "slightdown" | "slightlydown" | "微跌" => Some(Trend::SlightDown),
        "down" | "下跌" => Some(Trend::Down),
        "unclear" | "不明確" => Some(Trend::Unclear),
        _ => None,
    }
}

fn clean(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || ":：,，.。*-".contains(c))
}

/// Extract the trend and reason from a model reply
///
/// A labelled `Trend:` line wins; otherwise the earliest vocabulary term anywhere in the reply.
pub fn parse_reply(reply: &str) -> Result<FinalCall, ArbitrationError> {
    let found = TREND_LINE
        .captures(reply)
        .or_else(|| TERM.captures(reply))
        .and_then(|caps| caps.name("label"))
        .and_then(|m| label_to_trend(m.as_str()).map(|t| (t, m.end())));

    let (trend, term_end) = match found {
        Some(found) => found,
        None => {
            let excerpt: String = reply.trim().chars().take(EXCERPT_CHARS).collect();
            return Err(ArbitrationError::Unparsable(excerpt));
        }
    };

    let reason = REASON
        .captures(reply)
        .and_then(|caps| caps.name("text"))
        .map(|m| clean(m.as_str()))
        .filter(|r| !r.is_empty())
        .or_else(|| Some(clean(&reply[term_end..])).filter(|r| !r.is_empty()))
        .unwrap_or_else(|| reply.trim());

    Ok(FinalCall::new(trend, reason))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labelled_reply() {
        let call = parse_reply("Trend: SlightUp\nReason: Orders are improving.").unwrap();
        assert_eq!(call.trend, Trend::SlightUp);
        assert_eq!(call.reason, "Orders are improving");
    }

    #[test]
    fn test_label_line_beats_earlier_terms() {
        let reply = "Shares may go up on orders, but margins disappoint.\n**Trend:** Down\nReason: margin pressure";
        let call = parse_reply(reply).unwrap();
        assert_eq!(call.trend, Trend::Down);
        assert_eq!(call.reason, "margin pressure");
    }

    #[test]
    fn test_slight_wins_at_same_position() {
        assert_eq!(parse_reply("Slightly up, given steady demand").unwrap().trend, Trend::SlightUp);
        assert_eq!(parse_reply("slight down").unwrap().trend, Trend::SlightDown);
        assert_eq!(parse_reply("I expect SLIGHTUP").unwrap().trend, Trend::SlightUp);
    }

    #[test]
    fn test_unlabelled_reason_follows_term() {
        let call = parse_reply("Down - the halt will hit shipments").unwrap();
        assert_eq!(call.trend, Trend::Down);
        assert_eq!(call.reason, "the halt will hit shipments");

        let bare = parse_reply("Unclear").unwrap();
        assert_eq!(bare.trend, Trend::Unclear);
        assert_eq!(bare.reason, "Unclear");
    }

    #[test]
    fn test_native_labels() {
        let call = parse_reply("趨勢：微跌\n理由：停工影響出貨").unwrap();
        assert_eq!(call.trend, Trend::SlightDown);
        assert_eq!(call.reason, "停工影響出貨");
    }

    #[test]
    fn test_whole_words_only() {
        // "upgrade" and "downtown" are not vocabulary terms
        let call = parse_reply("Analysts upgrade the downtown office; outlook unclear.").unwrap();
        assert_eq!(call.trend, Trend::Unclear);
    }

    #[test]
    fn test_label_line_needs_whole_word() {
        let call = parse_reply("Trend: Upgrade cycle ahead, but shares look Down").unwrap();
        assert_eq!(call.trend, Trend::Down);

        let call = parse_reply("Trend: Downside limited, slightly up overall").unwrap();
        assert_eq!(call.trend, Trend::SlightUp);
    }

    #[test]
    fn test_no_term_is_an_error() {
        assert!(matches!(
            parse_reply("I cannot say."),
            Err(ArbitrationError::Unparsable(_))
        ));
    }
}
