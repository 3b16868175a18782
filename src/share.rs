//! Game-over share link

/// Share endpoint
pub const SHARE_ENDPOINT: &str = "https://www.twitter.com/share";
/// Hashtags attached to the post
pub const HASHTAGS: &str = "100Days100Projects";
/// Link back to the game
pub const GAME_URL: &str = "https://vvcun.csb.app/";

/// The message posted for a final score
pub fn share_message(score: u64) -> String {
    format!(
        "I scored {} points in this Car Avoidance Game created by @karthicktamil17. \
         you should check it out. It's fun! 😃 ",
        score
    )
}

/// Full share URL for a final score
pub fn share_link(score: u64) -> String {
    format!(
        "{}?text={}&hashtags={}&url={}",
        SHARE_ENDPOINT,
        percent_encode(&share_message(score)),
        percent_encode(HASHTAGS),
        percent_encode(GAME_URL)
    )
}

/// Percent-encode everything except RFC 3986 unreserved characters
pub fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len() * 3);
    for &byte in input.as_bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("abc-_.~09"), "abc-_.~09");
        assert_eq!(percent_encode("a b&c"), "a%20b%26c");
        assert_eq!(percent_encode("https://x.y/"), "https%3A%2F%2Fx.y%2F");
        assert_eq!(percent_encode("😃"), "%F0%9F%98%83");
    }

    #[test]
    fn test_share_link_embeds_score() {
        let link = share_link(1234);
        assert!(link.starts_with("https://www.twitter.com/share?text=I%20scored%201234%20points"));
        assert!(link.contains("&hashtags=100Days100Projects&"));
        assert!(link.ends_with("&url=https%3A%2F%2Fvvcun.csb.app%2F"));
        // Only the query separators survive unencoded
        assert_eq!(link.matches('&').count(), 2);
    }

    #[test]
    fn test_message_mentions_score() {
        assert!(share_message(0).starts_with("I scored 0 points"));
    }
}
