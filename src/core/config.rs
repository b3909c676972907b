// Scene configuration resolved from the page query string.
//
//   t=<text>      greeting text (percent-decoded, shown as plain text)
//   ground=0|1    ground plane layer (default on)
//   unlock=0|1    resume audio inside the selection gesture (default off)

pub const DEFAULT_GREETING: &str = "Merry Christmas!\n圣诞快乐";

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub show_ground_plane: bool,
    pub greeting: String,
    pub preemptive_unlock: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            show_ground_plane: true,
            greeting: DEFAULT_GREETING.to_string(),
            preemptive_unlock: false,
        }
    }
}

impl SceneConfig {
    /// Build from `location.search` (leading `?` optional). Unknown keys and
    /// unparsable flags fall back to defaults.
    pub fn from_query(search: &str) -> Self {
        let mut cfg = Self::default();
        if let Some(text) = query_param(search, "t") {
            if !text.is_empty() {
                cfg.greeting = text;
            }
        }
        if let Some(flag) = query_param(search, "ground").as_deref().and_then(parse_flag) {
            cfg.show_ground_plane = flag;
        }
        if let Some(flag) = query_param(search, "unlock").as_deref().and_then(parse_flag) {
            cfg.preemptive_unlock = flag;
        }
        cfg
    }

    /// Greeting split into display lines.
    pub fn greeting_lines(&self) -> Vec<&str> {
        self.greeting.split('\n').collect()
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// First value for `key` in a query string, percent-decoded.
pub fn query_param(search: &str, key: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query
        .split('&')
        .filter_map(|pair| {
            let mut it = pair.splitn(2, '=');
            Some((it.next()?, it.next().unwrap_or("")))
        })
        .find(|(k, _)| percent_decode(k) == key)
        .map(|(_, v)| percent_decode(v))
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim and invalid
/// UTF-8 is replaced, so arbitrary input never fails.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[inline]
fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
