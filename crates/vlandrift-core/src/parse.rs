// ── CLI output parser ──
//
// Input is the verbatim text of a `show vlan brief | inc active` style
// session: an optional echo of earlier commands, the prompt line, then
// one row per VLAN: `<id> <name> <status> [ports...]`.

use serde::Serialize;
use tracing::trace;

use crate::model::{VlanId, VlanMap, is_reserved};

/// Status token a row must carry to count as an active VLAN.
const ACTIVE: &str = "active";

/// Hostname and VLANs read from one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedCapture {
    /// Prompt hostname, `None` when no prompt was found.
    pub hostname: Option<String>,
    pub vlans: VlanMap,
}

/// Parse VLAN rows into a map of name → ID.
///
/// A row qualifies when it has at least three tokens and the third is
/// exactly `active`. Reserved IDs are dropped. IDs outside the switch
/// range are kept as found; rows whose first token is not a base-10
/// integer (or overflows `i64`) are skipped. Repeated names keep the
/// last row.
pub fn parse_vlan_brief(raw: &str) -> VlanMap {
    let mut vlans = VlanMap::new();
    for (lineno, line) in raw.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let (Some(id), Some(name), Some(status)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            continue;
        };
        if status != ACTIVE {
            continue;
        }
        let Ok(id) = id.parse::<VlanId>() else {
            trace!(line = lineno + 1, text = %line, "skipping malformed VLAN row");
            continue;
        };
        if is_reserved(id) {
            continue;
        }
        vlans.insert(name, id);
    }
    vlans
}

/// Extract the prompt hostname: the text before the first `>`, starting
/// after the line break that precedes it.
///
/// Returns an empty string when the capture contains no prompt.
pub fn extract_hostname(raw: &str) -> String {
    let Some(prompt_end) = raw.find('>') else {
        return String::new();
    };
    let before = &raw[..prompt_end];
    let line_start = before.rfind(['\n', '\r']).map_or(0, |pos| pos + 1);
    before[line_start..].trim().to_owned()
}

/// Parse both the hostname and the VLAN rows of a capture.
pub fn parse_capture(raw: &str) -> ParsedCapture {
    let hostname = extract_hostname(raw);
    ParsedCapture {
        hostname: (!hostname.is_empty()).then_some(hostname),
        vlans: parse_vlan_brief(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SESSION: &str = "term len 0\n\
        ESW1>show vlan-switch brief | inc active\n\
        1    default                          active    Fa1/0, Fa1/1, Fa1/2, Fa1/3\n\
        100  runt                             active\n\
        200  infra                            active\n\
        300  engineer                         active\n\
        1002 fddi-default                     active\n\
        1003 token-ring-default               active\n\
        1004 fddinet-default                  active\n\
        1005 trnet-default                    active\n";

    #[test]
    fn parses_full_session() {
        assert_eq!(
            parse_vlan_brief(SESSION),
            VlanMap::from([("runt", 100), ("infra", 200), ("engineer", 300)])
        );
        assert_eq!(extract_hostname(SESSION), "ESW1");
    }

    #[test]
    fn prompt_on_first_line() {
        let raw = "ESW1>show vlan brief | inc active\n\
                   1 default active Fa1/0\n\
                   100 runt active\n\
                   1002 fddi-default active\n";
        let capture = parse_capture(raw);
        assert_eq!(capture.vlans, VlanMap::from([("runt", 100)]));
        assert_eq!(capture.hostname.as_deref(), Some("ESW1"));
    }

    #[test]
    fn status_must_match_exactly() {
        let raw = "100 runt act/unsup\n\
                   200 inactive-vlans inactive\n\
                   300 proactive activeX\n\
                   400 guest active\n";
        assert_eq!(parse_vlan_brief(raw), VlanMap::from([("guest", 400)]));
    }

    #[test]
    fn short_and_non_numeric_rows_are_skipped() {
        let raw = "100 runt\n\
                   \n\
                   abc broken active\n\
                   12x trailing active\n\
                   9999 huge active\n";
        assert_eq!(parse_vlan_brief(raw), VlanMap::from([("huge", 9999)]));
    }

    #[test]
    fn out_of_range_ids_are_preserved() {
        let raw = "-5 neg active\n\
                   4294967296 wide active\n\
                   0100 padded active\n";
        assert_eq!(
            parse_vlan_brief(raw),
            VlanMap::from([("neg", -5), ("wide", 4_294_967_296), ("padded", 100)])
        );
    }

    #[test]
    fn duplicate_names_keep_last_row() {
        let raw = "100 infra active\n200 infra active\n";
        assert_eq!(parse_vlan_brief(raw), VlanMap::from([("infra", 200)]));
    }

    #[test]
    fn reserved_ids_never_survive() {
        let raw = "1 default active\n1001 a active\n1002 b active\n\
                   1003 c active\n1004 d active\n1005 e active\n";
        assert!(parse_vlan_brief(raw).is_empty());
    }

    #[test]
    fn crlf_output() {
        let raw = "term len 0\r\nSW-2>show vlan brief\r\n10 mgmt active Gi0/1\r\n";
        let capture = parse_capture(raw);
        assert_eq!(capture.hostname.as_deref(), Some("SW-2"));
        assert_eq!(capture.vlans, VlanMap::from([("mgmt", 10)]));
    }

    #[test]
    fn hostname_without_prompt_is_empty() {
        assert_eq!(extract_hostname(""), "");
        assert_eq!(extract_hostname("term len 0\n"), "");
        assert_eq!(parse_capture("100 runt active\n").hostname, None);
    }

    #[test]
    fn render_then_parse_is_identity() {
        let map = VlanMap::from([("runt", 100), ("infra", 200), ("engineer", 4094), ("x", 2)]);
        assert_eq!(parse_vlan_brief(&map.render_brief()), map);
    }
}
