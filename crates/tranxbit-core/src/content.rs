//! Landing page content: FAQ entries and featured offers.

use serde::Serialize;

use crate::error::ContentError;

/// A question and its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaqEntry {
    pub question: &'static str,
    pub answer: &'static str,
}

pub const FAQ: [FaqEntry; 7] = [
    FaqEntry {
        question: "How does Tranxbit work?",
        answer: "Tranxbit is a secure platform for buying and selling gift cards. Simply create an account, browse available gift cards or list your own for sale. Our platform connects buyers and sellers, ensuring safe transactions with escrow protection and instant digital delivery.",
    },
    FaqEntry {
        question: "What types of gift cards can I trade?",
        answer: "Tranxbit supports a wide variety of gift cards including Amazon, iTunes, Google Play, Steam, Vanilla, eBay, Walmart, Target, and many more. Both physical and digital gift cards are accepted. Check our supported cards page for the complete list.",
    },
    FaqEntry {
        question: "How do I sell my gift cards?",
        answer: "To sell your gift cards: 1) Log into your account, 2) Click 'Sell Gift Card', 3) Select the card type and enter the amount, 4) Upload clear images of the card, 5) Set your price, and 6) Submit for verification. Once approved, your card will be listed on our marketplace.",
    },
    FaqEntry {
        question: "How long does it take to receive payment?",
        answer: "Once your gift card is purchased and verified by the buyer, payment is typically released within 5-15 minutes. For first-time sellers, there may be a 24-hour verification period. Payments are instantly available in your Tranxbit wallet.",
    },
    FaqEntry {
        question: "What payment methods do you support?",
        answer: "Tranxbit supports multiple payment methods including bank transfers, mobile money (MTN, Vodafone, AirtelTigo), PayPal, cryptocurrency (Bitcoin, USDT), and direct wallet-to-wallet transfers within the platform.",
    },
    FaqEntry {
        question: "Are transactions on Tranxbit secure?",
        answer: "Yes, absolutely. We use bank-level encryption and escrow services to protect both buyers and sellers. Gift cards are held in escrow until the transaction is verified. We also have a dispute resolution team and fraud detection systems in place.",
    },
    FaqEntry {
        question: "What are the fees for trading?",
        answer: "Tranxbit charges a small service fee: 2% for sellers and 1% for buyers. There are no hidden fees. Withdrawal fees vary depending on your chosen payment method, typically ranging from 0-2%.",
    },
];

/// A promotional slot in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeaturedOffer {
    pub image: &'static str,
    pub alt: &'static str,
}

pub const FEATURED_OFFERS: [FeaturedOffer; 4] = [
    FeaturedOffer {
        image: "/ads/amazon-ads.svg",
        alt: "Amazon Gift Cards",
    },
    FeaturedOffer {
        image: "/ads/netflix-ads.svg",
        alt: "Netflix Subscriptions",
    },
    FeaturedOffer {
        image: "/ads/steam-ads.svg",
        alt: "Steam Wallet Codes",
    },
    FeaturedOffer {
        image: "/ads/apple-ads.svg",
        alt: "Apple Gift Cards",
    },
];

/// FAQ accordion with at most one entry expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FaqAccordion {
    open: Option<usize>,
}

impl FaqAccordion {
    #[must_use]
    pub const fn new() -> Self {
        Self { open: None }
    }

    #[must_use]
    pub const fn open_index(&self) -> Option<usize> {
        self.open
    }

    /// Currently expanded entry.
    #[must_use]
    pub fn open_entry(&self) -> Option<&'static FaqEntry> {
        self.open.and_then(|i| FAQ.get(i))
    }

    /// Expand `index`, or collapse it if it is already expanded. Expanding
    /// one entry collapses any other.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::UnknownFaq`] if `index` is out of range.
    pub fn toggle(&mut self, index: usize) -> Result<(), ContentError> {
        if index >= FAQ.len() {
            return Err(ContentError::UnknownFaq {
                index,
                len: FAQ.len(),
            });
        }
        self.open = if self.open == Some(index) { None } else { Some(index) };
        Ok(())
    }
}
