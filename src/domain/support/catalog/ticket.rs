//! Ticket desk: purchases, refunds, cancellations, transfers, QR codes,
//! resale.

use crate::domain::foundation::Category;
use crate::domain::routing::KeywordTable;
use crate::domain::support::chunking::ChunkWidth;
use crate::domain::support::profile::DomainProfile;

const WIDTH: ChunkWidth = ChunkWidth::of(20);

const SYSTEM_PROMPT: &str = r#"You are Ticket Support for FanFirst.
Help with: purchases, refunds, cancellations, transfers, QR codes, resale.
Be brief (2-3 sentences), friendly, use emojis sparingly."#;

pub const CANCEL: &str = r#"❌ **Ticket Cancellation**

- **Event cancelled by organizer:** Full automatic refund
- **Want to cancel your purchase:** Refunds available within 48hrs
- **Can't attend anymore:** List for resale instead!

**To request cancellation/refund:**
1. Go to Dashboard → My Tickets
2. Select your ticket
3. Click "Request Refund" or "List for Sale"

Need help? Email support@fanfirst.com"#;

pub const REFUND: &str = r#"💰 **Refund Policy**

Refunds are available if:
- Event is cancelled → Full refund automatically
- Event postponed → Option to refund or keep ticket
- Within 48 hours of purchase → Full refund minus gas fees

**To request:** Dashboard → My Tickets → Select ticket → "Request Refund"

Need help with a specific ticket? Share your ticket ID!"#;

pub const TRANSFER: &str = r#"🔄 **Ticket Transfer**

To transfer your NFT ticket:
1. Go to Dashboard → My Tickets
2. Click on the ticket
3. Choose "Transfer"
4. Enter recipient's wallet address
5. Confirm the transaction

**Note:** Transfer is free, but resale caps still apply!"#;

pub const QR_CODE: &str = r#"📱 **QR Code for Entry**

Your QR code:
1. Go to Dashboard → My Tickets
2. Select the event ticket
3. Click "Show QR Code"
4. Show at venue entrance

**Pro tip:** Save a screenshot for offline!
QR activates 24 hours before event."#;

pub const QR: &str = r#"📱 **QR Code for Entry**

1. Dashboard → My Tickets
2. Select ticket → "Show QR"
3. Show at venue

Activates 24hrs before event!"#;

pub const RESALE: &str = r#"💸 **Resale Your Ticket**

To list for resale:
1. Dashboard → My Tickets
2. Select ticket → "List for Sale"
3. Set price (max 120% of original)
4. Confirm listing

Artist gets 10% royalty on resales."#;

pub const RESELL: &str = r#"💸 **Resale Your Ticket**

1. Dashboard → My Tickets → Select ticket
2. Click "List for Sale"
3. Set your price (capped at 120% of original)

This prevents scalping while letting you recover costs!"#;

pub const BUY: &str = r#"🎫 **How to Buy Tickets**

1. Browse events at /events
2. Select an event you love
3. Complete the FanIQ Quiz (proves you're a real fan!)
4. Connect your wallet
5. Purchase your NFT ticket

Tickets are minted directly to your wallet!"#;

pub const PURCHASE: &str = r#"🎫 **How to Purchase Tickets**

1. Go to /events and find your event
2. Click "Get Tickets"
3. Pass the FanIQ Quiz (verifies real fans)
4. Connect wallet & complete payment
5. NFT ticket appears in your wallet!"#;

pub const WHERE: &str = r#"🎫 **Where to Get Tickets**

Browse all available events at **/events**

1. Find your event
2. Pass the FanIQ Quiz
3. Connect wallet & purchase

Your NFT ticket will be in your wallet!"#;

pub const HOW: &str = r#"🎫 **How Tickets Work**

1. Browse: /events
2. Prove you're a fan: FanIQ Quiz
3. Connect wallet: MetaMask or Phantom
4. Purchase: NFT minted to your wallet
5. Attend: Show QR at venue

Need specific help? Ask about refunds, transfers, or QR codes!"#;

pub const DEFAULT: &str = r#"🎫 **Ticket Support**

I can help with:
- 💰 **Refunds** - Request within 48 hours
- ❌ **Cancellations** - Cancel or list for resale
- 🔄 **Transfers** - Send to another wallet
- 📱 **QR Codes** - Get your entry code
- 💸 **Resale** - List your ticket for sale

**Quick links:**
- View tickets: Dashboard → My Tickets
- Browse events: /events
- Contact: support@fanfirst.com

What specifically do you need help with?"#;

/// Specific intents first; "where" and "how" are catch-alls.
pub(crate) fn profile() -> DomainProfile {
    DomainProfile {
        category: Category::Ticket,
        cache: KeywordTable::from_pairs([
            ("cancel", CANCEL),
            ("refund", REFUND),
            ("transfer", TRANSFER),
            ("qr code", QR_CODE),
            ("qr", QR),
            ("resale", RESALE),
            ("resell", RESELL),
            ("buy", BUY),
            ("purchase", PURCHASE),
            ("where", WHERE),
            ("how", HOW),
        ]),
        default_text: DEFAULT,
        system_prompt: SYSTEM_PROMPT,
        chunk_width: WIDTH,
    }
}
