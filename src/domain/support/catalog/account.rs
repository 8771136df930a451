//! Account desk: wallet, profile, Fandom Score, Spotify, sign-in.

use crate::domain::foundation::Category;
use crate::domain::routing::KeywordTable;
use crate::domain::support::chunking::ChunkWidth;
use crate::domain::support::profile::DomainProfile;

const WIDTH: ChunkWidth = ChunkWidth::of(15);

const SYSTEM_PROMPT: &str = r#"You are Account Support for FanFirst.
Help with: profile, wallet, fandom score, spotify.
Be brief."#;

pub const WALLET: &str = r#"🔗 **Connect Your Wallet**

To connect:
1. Click **"Connect Wallet"** in the header
2. Choose your wallet:
   - MetaMask (EVM)
   - Phantom (Solana)
3. Approve the connection

**Supported:** Polygon, Ethereum, Solana

Once connected, you can buy NFT tickets!"#;

pub const FANDOM: &str = r#"📊 **Your Fandom Score**

Fandom Score shows your fan engagement level.

**Earn points by:**
- 🎫 Attending events: +50
- 💬 Community posts: +10
- ✅ FanIQ Quiz: +5-25
- 🤝 Getting vouched: +15

**Higher score = earlier ticket access!**

View your score: Dashboard → Profile"#;

pub const SCORE: &str = r#"📊 **Fandom Score**

Your engagement level that unlocks benefits!

**Earn points:**
- Attend events: +50
- Community posts: +10
- FanIQ Quiz: +5-25

Check yours at Dashboard → Profile"#;

pub const SPOTIFY: &str = r#"🎵 **Spotify Integration**

Connect Spotify to verify your fan status:
1. Go to Dashboard → Settings
2. Click "Connect Spotify"
3. Authorize FanFirst

**Benefits:**
- Boost Fandom Score for following artists
- Personalized event recommendations

Your data stays private!"#;

pub const LOGIN: &str = r#"🔐 **Login Help**

To sign in:
1. Click "Sign In" in header
2. Use Google, Email, or Wallet
3. Complete verification

**Issues?**
- Clear browser cookies
- Try incognito mode
- Email: support@fanfirst.com"#;

pub const PROFILE: &str = r#"👤 **Your Profile**

Manage your profile at Dashboard → Profile:
- Update name and avatar
- View Fandom Score
- See attendance history
- Manage connected accounts

**Connected accounts:**
- Wallet (required for purchases)
- Spotify (optional, boosts score)"#;

pub const DEFAULT: &str = r#"👤 **Account Support**

I can help with:
- 🔗 **Wallet** - Connect MetaMask or Phantom
- 📊 **Fandom Score** - Check and improve it
- 🎵 **Spotify** - Link for fan verification
- 🔐 **Login** - Sign in issues

**Quick links:**
- Your profile: /dashboard
- Settings: /settings

What do you need help with?"#;

pub(crate) fn profile() -> DomainProfile {
    DomainProfile {
        category: Category::Account,
        cache: KeywordTable::from_pairs([
            ("wallet", WALLET),
            ("fandom", FANDOM),
            ("score", SCORE),
            ("spotify", SPOTIFY),
            ("login", LOGIN),
            ("profile", PROFILE),
        ]),
        default_text: DEFAULT,
        system_prompt: SYSTEM_PROMPT,
        chunk_width: WIDTH,
    }
}
