//! Labels, relationship types and categorical attributes of the dataset

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Node labels
pub mod labels {
    pub const CUSTOMER: &str = "Customer";
    pub const CATEGORY: &str = "Category";
    pub const PRODUCT: &str = "Product";
    pub const ORDER: &str = "Order";
    pub const REVIEW: &str = "Review";
    pub const DEVICE: &str = "Device";
    pub const TRANSACTION: &str = "Transaction";
    pub const LOCATION: &str = "Location";
    pub const SUPPLIER: &str = "Supplier";
    pub const CAMPAIGN: &str = "MarketingCampaign";
}

/// Relationship types
pub mod rels {
    /// Customer -> Order
    pub const PLACED: &str = "PLACED";
    /// Order -> Product
    pub const CONTAINS: &str = "CONTAINS";
    /// Product -> Category
    pub const BELONGS_TO: &str = "BELONGS_TO";
    /// Customer -> Review
    pub const WROTE: &str = "WROTE";
    /// Review -> Product
    pub const ABOUT: &str = "ABOUT";
    /// Customer -> Transaction
    pub const MADE: &str = "MADE";
    /// Transaction -> Device
    pub const USES: &str = "USES";
    /// Transaction -> Location
    pub const FROM: &str = "FROM";
    /// Supplier -> Product
    pub const SUPPLIES: &str = "SUPPLIES";
    /// Customer -> MarketingCampaign
    pub const ENGAGED_WITH: &str = "ENGAGED_WITH";
}

/// Entities that carry a generated `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Product,
    Order,
    Review,
    Device,
    Transaction,
    Supplier,
    Campaign,
}

impl EntityKind {
    pub const ALL: [EntityKind; 8] = [
        EntityKind::Customer,
        EntityKind::Product,
        EntityKind::Order,
        EntityKind::Review,
        EntityKind::Device,
        EntityKind::Transaction,
        EntityKind::Supplier,
        EntityKind::Campaign,
    ];

    /// Leading character of the entity's identifiers
    pub fn prefix(&self) -> char {
        match self {
            EntityKind::Customer => 'C',
            EntityKind::Product => 'P',
            EntityKind::Order => 'O',
            EntityKind::Review => 'R',
            EntityKind::Device => 'D',
            EntityKind::Transaction => 'T',
            EntityKind::Supplier => 'S',
            EntityKind::Campaign => 'M',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Customer => labels::CUSTOMER,
            EntityKind::Product => labels::PRODUCT,
            EntityKind::Order => labels::ORDER,
            EntityKind::Review => labels::REVIEW,
            EntityKind::Device => labels::DEVICE,
            EntityKind::Transaction => labels::TRANSACTION,
            EntityKind::Supplier => labels::SUPPLIER,
            EntityKind::Campaign => labels::CAMPAIGN,
        }
    }
}

/// Declares a closed set of string-valued attribute values
macro_rules! attribute_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            /// Uniformly sample one value
            pub fn sample(rng: &mut dyn RngCore) -> Self {
                *Self::ALL.choose(rng).unwrap_or(&Self::ALL[0])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

attribute_enum!(
    /// Customer.segment
    Segment { Premium => "Premium", Standard => "Standard", Basic => "Basic" }
);

attribute_enum!(
    /// Order.status
    OrderStatus {
        Pending => "PENDING",
        Processing => "PROCESSING",
        Completed => "COMPLETED",
        Shipped => "SHIPPED",
    }
);

attribute_enum!(
    /// Device.type
    DeviceType { Mobile => "Mobile", Desktop => "Desktop", Tablet => "Tablet" }
);

attribute_enum!(
    Browser { Chrome => "Chrome", Firefox => "Firefox", Safari => "Safari" }
);

attribute_enum!(
    OperatingSystem { Ios => "iOS", Android => "Android", Windows => "Windows", MacOs => "MacOS" }
);

attribute_enum!(
    /// Transaction.status
    TransactionStatus { Success => "SUCCESS", Pending => "PENDING", Failed => "FAILED" }
);

attribute_enum!(
    /// MarketingCampaign.type
    CampaignType { Email => "Email", Social => "Social", Display => "Display", Search => "Search" }
);

attribute_enum!(
    /// MarketingCampaign.status
    CampaignStatus { Active => "ACTIVE", Planned => "PLANNED", Completed => "COMPLETED" }
);

/// Categories seeded when the configuration does not name any others
pub const DEFAULT_CATEGORIES: [&str; 5] = ["Electronics", "Clothing", "Books", "Home", "Sports"];
