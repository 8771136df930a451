//! Event desk: upcoming games, concerts and shows.

use crate::domain::foundation::Category;
use crate::domain::routing::KeywordTable;
use crate::domain::support::chunking::ChunkWidth;
use crate::domain::support::profile::DomainProfile;

const WIDTH: ChunkWidth = ChunkWidth::of(15);

const SYSTEM_PROMPT: &str = r#"You are Event Info for FanFirst.
Available: Lakers games, Taylor Swift, Drake concert, Hamilton.
Be brief."#;

/// Upcoming-events listing; doubles as the desk's default reply.
pub const UPCOMING: &str = r#"🎫 **Upcoming Events**

🏀 **LA Lakers vs Boston Celtics**
   📅 March 15, 2025 | 📍 Crypto.com Arena | 🎟️ Available

🎤 **Taylor Swift - Eras Tour**
   📅 April 10, 2025 | 📍 SoFi Stadium | 🎟️ Limited

🎵 **Drake Concert**
   📅 May 5, 2025 | 📍 Staples Center | 🎟️ Available

🎭 **Hamilton - Broadway Tour**
   📅 June 20, 2025 | 📍 Dolby Theatre | 🎟️ On Sale Soon

Browse all events at **/events**"#;

pub const LAKERS: &str = r#"🏀 **LA Lakers Events**

📅 **Next Game:** LA Lakers vs Boston Celtics
📍 **Venue:** Crypto.com Arena, Los Angeles
🗓️ **Date:** March 15, 2025
🎟️ **Tickets:** Starting at $125

Browse all Lakers games at /events?search=lakers"#;

pub const TAYLOR: &str = r#"🎤 **Taylor Swift - Eras Tour**

📅 **Date:** April 10, 2025
📍 **Venue:** SoFi Stadium, Los Angeles
🎟️ **Tickets:** Limited availability!

Get tickets at /events before they sell out!"#;

pub const DRAKE: &str = r#"🎵 **Drake Concert**

📅 **Date:** May 5, 2025
📍 **Venue:** Staples Center
🎟️ **Tickets:** Available

Buy at /events?search=drake"#;

pub(crate) fn profile() -> DomainProfile {
    DomainProfile {
        category: Category::Event,
        cache: KeywordTable::from_pairs([
            ("lakers", LAKERS),
            ("taylor", TAYLOR),
            ("drake", DRAKE),
            ("upcoming", UPCOMING),
            ("events", UPCOMING),
            ("what", UPCOMING),
            ("when", UPCOMING),
            ("show", UPCOMING),
        ]),
        default_text: UPCOMING,
        system_prompt: SYSTEM_PROMPT,
        chunk_width: WIDTH,
    }
}
