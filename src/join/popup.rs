use std::fmt::Write;

use crate::election::{ElectionRecord, Winner};
use crate::join::PartyShare;
use crate::style::party_color;

/// Popup markup for a matched region: record details, then one bar per party share
/// (width proportional to the share, colored with the party's full-strength color).
pub(crate) fn popup_content(record: &ElectionRecord, winner: &Winner, shares: &[PartyShare]) -> String {
    let or_unknown = |value: Option<String>| escape_html(value.as_deref().unwrap_or("Unknown"));

    let mut bars = String::new();
    for share in shares {
        let percent = share.fraction * 100.0;
        // Writing into a String cannot fail.
        let _ = write!(
            bars,
            r#"
        <div class="bar-container">
            <div class="bar" style="width: {width:.2}%; background-color: {color};"></div>
            <span class="bar-label">{party} ({percent:.1}%)</span>
        </div>"#,
            width = percent.min(100.0),
            color = party_color(share.party, 100.0),
            party = share.party,
        );
    }

    format!(
        r#"<b>Department:</b> {department}<br>
<b>Circonscription:</b> {circonscription}<br>
<b>Previous Leading:</b> {previous}<br>
<b>Current Leading:</b> {winner}<br>
<div class="chart-container">{bars}
</div>"#,
        department = or_unknown(record.department()),
        circonscription = or_unknown(record.circonscription()),
        previous = or_unknown(record.previous()),
        winner = escape_html(&winner.to_string()),
    )
}

/// Popup markup reduced to its text, one line per `<br>` or block element.
/// Character references are left as they are, so the result stays valid HTML-escaped text.
pub(crate) fn popup_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag: Option<String> = None;
    for c in html.chars() {
        match (&mut tag, c) {
            (None, '<') => tag = Some(String::new()),
            (Some(name), '>') => {
                let name = name.trim_start_matches('/').split_whitespace().next().unwrap_or("");
                if matches!(name.to_ascii_lowercase().as_str(), "br" | "div" | "p") {
                    text.push('\n');
                }
                tag = None;
            }
            (Some(name), c) => name.push(c),
            (None, c) => text.push(c),
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape text for inclusion in HTML content or a quoted attribute.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::election::PartyCode;

    #[test]
    fn renders_fields_and_bars_in_order() {
        let record: ElectionRecord = serde_json::from_value(json!({
            "Department": "Ain", "Circonscription": "1ère", "Previous": "ENS", "Winner": "RN",
        })).unwrap();
        let shares = [
            PartyShare { party: PartyCode::Rn, fraction: 0.42 },
            PartyShare { party: PartyCode::Ens, fraction: 0.3 },
        ];
        let html = popup_content(&record, &Winner::Party(PartyCode::Rn), &shares);

        assert!(html.contains("<b>Department:</b> Ain<br>"));
        assert!(html.contains("<b>Circonscription:</b> 1ère<br>"));
        assert!(html.contains("<b>Previous Leading:</b> ENS<br>"));
        assert!(html.contains("<b>Current Leading:</b> RN<br>"));
        assert!(html.contains("width: 42.00%; background-color: #004a77;"));
        assert!(html.contains("RN (42.0%)"));
        assert!(html.contains("ENS (30.0%)"));
        assert!(html.find("RN (42.0%)").unwrap() < html.find("ENS (30.0%)").unwrap());
    }

    #[test]
    fn missing_fields_read_unknown() {
        let html = popup_content(&ElectionRecord::default(), &Winner::Unknown, &[]);
        assert!(html.contains("<b>Department:</b> Unknown<br>"));
        assert!(html.contains("<b>Current Leading:</b> Unknown<br>"));
        assert!(!html.contains("bar-container"));
    }

    #[test]
    fn record_text_is_escaped() {
        let record: ElectionRecord = serde_json::from_value(json!({
            "Department": "<script>alert('x')</script>",
        })).unwrap();
        let html = popup_content(&record, &Winner::Unknown, &[]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn popup_text_drops_markup() {
        let record: ElectionRecord = serde_json::from_value(json!({
            "Department": "Ain & Co", "Circonscription": "1ère", "Previous": "ENS",
        })).unwrap();
        let shares = [PartyShare { party: PartyCode::Rn, fraction: 0.42 }];
        let text = popup_text(&popup_content(&record, &Winner::Party(PartyCode::Rn), &shares));

        assert_eq!(
            text,
            "Department: Ain &amp; Co\nCirconscription: 1ère\nPrevious Leading: ENS\nCurrent Leading: RN\nRN (42.0%)",
        );
    }

    #[test]
    fn percentage_label_has_one_decimal() {
        let shares = [PartyShare { party: PartyCode::Eco, fraction: 0.12345 }];
        let html = popup_content(&ElectionRecord::default(), &Winner::Unknown, &shares);
        assert!(html.contains("ECO (12.3%)"));
    }
}
