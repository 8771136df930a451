//! FAQ desk: what FanFirst is and how it works.

use crate::domain::foundation::Category;
use crate::domain::routing::KeywordTable;
use crate::domain::support::chunking::ChunkWidth;
use crate::domain::support::profile::DomainProfile;

const WIDTH: ChunkWidth = ChunkWidth::of(15);

const SYSTEM_PROMPT: &str = r#"You are FAQ support for FanFirst NFT ticketing.
Be brief, helpful, use emojis sparingly.
Reply in 2-3 sentences."#;

pub const WHAT_IS_FANFIRST: &str = r#"🎫 **FanFirst** is an AI-powered NFT ticketing platform that ensures real fans get access to tickets before scalpers and bots.

**Key Features:**
- 🛡️ Anti-bot protection via FanIQ Quiz
- 🎟️ NFT tickets stored on blockchain
- 📊 Fandom Score for early access
- 💰 Smart resale caps to prevent scalping

Ready to experience ticketing done right!"#;

pub const HOW_DOES: &str = r#"Here's how FanFirst works:

1️⃣ **Create Account** - Sign up and connect your wallet
2️⃣ **Prove Fandom** - Take the FanIQ quiz to verify you're a real fan
3️⃣ **Get Priority** - Higher Fandom Score = earlier ticket access
4️⃣ **Buy Tickets** - Purchase NFT tickets minted to your wallet
5️⃣ **Attend Event** - Use QR code for entry

Simple, secure, and fair!"#;

pub const NFT: &str = r#"🎟️ **NFT Tickets** are blockchain-based digital tickets.

**Benefits:**
- ✅ Verifiable authenticity (can't be faked)
- ✅ Truly yours (stored in your crypto wallet)
- ✅ Transferable with rules (resale caps apply)
- ✅ Proof of attendance forever

Unlike traditional tickets, NFT tickets can't be counterfeited!"#;

pub const FANDOM_SCORE: &str = r#"📊 **Fandom Score** measures your fan engagement.

**How to earn points:**
- 🎫 Attend events: +50 points
- 💬 Community posts: +10 points
- ✅ Take FanIQ Quiz: +5-25 points
- 🤝 Get vouched by others: +15 points

**Higher score = earlier ticket access!**"#;

pub const RESALE: &str = r#"💰 **Smart Resale** on FanFirst protects fans from scalping.

**How it works:**
- Maximum markup: Usually 120% of original price
- Artist royalty: 10% on every resale
- All resales tracked on blockchain

You can sell tickets, but not at crazy scalper prices!"#;

pub const HELP: &str = r#"👋 **Welcome to FanFirst Support!**

I can help with:
- 🎫 **Tickets** - Buying, refunds, transfers
- 🎵 **Events** - Find concerts, games, shows
- 👤 **Account** - Wallet, profile, Fandom Score
- ❓ **FAQ** - How FanFirst works

Just ask your question and I'll route you to the right agent!"#;

pub const DEFAULT: &str = r#"👋 **FanFirst Support**

**Quick answers:**
- 🎫 **Buy tickets:** Browse at /events
- 💰 **Refunds:** Dashboard → My Tickets
- 🔗 **Connect wallet:** Click "Connect Wallet" in header
- 📊 **Fandom Score:** Earn by attending events & taking quizzes

**Learn more:**
- About FanFirst: /about
- All events: /events
- Your dashboard: /dashboard

What else can I help with?"#;

pub(crate) fn profile() -> DomainProfile {
    DomainProfile {
        category: Category::Faq,
        cache: KeywordTable::from_pairs([
            ("what is fanfirst", WHAT_IS_FANFIRST),
            ("how does", HOW_DOES),
            ("nft", NFT),
            ("fandom score", FANDOM_SCORE),
            ("resale", RESALE),
            ("help", HELP),
        ]),
        default_text: DEFAULT,
        system_prompt: SYSTEM_PROMPT,
        chunk_width: WIDTH,
    }
}
