//! Dashboard shell: account header data and sidebar navigation.
//!
//! Account figures are mock values until wallet and order services exist.

use serde::Serialize;

/// A notification in the header bell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub read: bool,
}

/// Header data for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    pub display_name: String,
    pub available_credits_cents: u64,
    pub pending_orders: u32,
    pub notifications: Vec<Notification>,
}

impl AccountSummary {
    /// The placeholder account shown before wallets are wired up.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            display_name: "John Doe".to_owned(),
            available_credits_cents: 10,
            pending_orders: 0,
            notifications: Vec::new(),
        }
    }

    /// Up to two upper-case initials, one per word of the display name.
    #[must_use]
    pub fn initials(&self) -> String {
        self.display_name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Credits rendered as `$0.10`.
    #[must_use]
    pub fn formatted_credits(&self) -> String {
        format!(
            "${}.{:02}",
            self.available_credits_cents / 100,
            self.available_credits_cents % 100
        )
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

/// A sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub href: &'static str,
}

/// Main sidebar links, top to bottom.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem {
        id: "dashboard",
        label: "Dashboard",
        href: "/dashboard",
    },
    NavItem {
        id: "buy",
        label: "Buy Gift Card",
        href: "/buy-giftcards",
    },
    NavItem {
        id: "sell",
        label: "Sell Gift Card",
        href: "/sell-giftcards",
    },
    NavItem {
        id: "transactions",
        label: "Transactions",
        href: "/transactions",
    },
    NavItem {
        id: "settings",
        label: "Settings",
        href: "/settings",
    },
];

/// Links pinned to the bottom of the sidebar.
pub const BOTTOM_NAV_ITEMS: [NavItem; 1] = [NavItem {
    id: "logout",
    label: "Logout",
    href: "/logout",
}];

/// The link whose href equals `path` exactly.
#[must_use]
pub fn active_item(path: &str) -> Option<&'static NavItem> {
    NAV_ITEMS
        .iter()
        .chain(BOTTOM_NAV_ITEMS.iter())
        .find(|item| item.href == path)
}

/// Whether the balance header is drawn on `path`. Settings has its own layout.
#[must_use]
pub fn header_visible(path: &str) -> bool {
    path != "/settings"
}
