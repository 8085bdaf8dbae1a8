//! Ledger entries and the validation applied to submitted entry forms.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::messages::Message;
use super::user::UserId;

/// Stable, monotonically assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Interpret a path segment; non-numeric segments identify no item.
    ///
    /// # Examples
    /// ```
    /// use ledger::domain::ItemId;
    ///
    /// assert_eq!(ItemId::from_path("42"), Some(ItemId::new(42)));
    /// assert_eq!(ItemId::from_path("abc"), None);
    /// ```
    pub fn from_path(segment: &str) -> Option<Self> {
        segment.trim().parse::<i64>().ok().map(Self)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly positive amount in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Accepts only values greater than zero.
    pub fn new(value: i64) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Income,
    Expense,
}

impl ItemType {
    /// Name stored in the `items.kind` column and used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is not `Income` or `Expense`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown item type '{0}'")]
pub struct UnknownItemType(pub String);

impl FromStr for ItemType {
    type Err = UnknownItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(UnknownItemType(other.to_owned())),
        }
    }
}

/// Raw entry form as submitted by a client.
///
/// Kept verbatim so a rejected form can be echoed back for redisplay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInput {
    #[serde(default)]
    pub amount: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub memo: Option<String>,
}

/// Why an entry form was rejected. Variants are reported in check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ItemValidationError {
    #[error("amount, type, and event are required")]
    MissingFields,
    #[error("type must be Income or Expense")]
    InvalidType,
    #[error("amount must be a positive integer")]
    InvalidAmount,
}

impl ItemValidationError {
    /// User-facing message for this failure.
    pub fn message(self) -> Message {
        match self {
            Self::MissingFields => Message::ItemFieldsRequired,
            Self::InvalidType => Message::InvalidItemType,
            Self::InvalidAmount => Message::InvalidAmount,
        }
    }
}

/// Validated, mutable fields of an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFields {
    pub amount: Amount,
    pub kind: ItemType,
    pub event: String,
    pub memo: Option<String>,
}

impl ItemFields {
    /// Validate a submitted form.
    ///
    /// Checks, in order: amount, type, and event are present; type is
    /// `Income` or `Expense`; amount is an integer greater than zero. The
    /// event is trimmed and a blank memo is stored as absent.
    ///
    /// # Examples
    /// ```
    /// use ledger::domain::{ItemFields, ItemInput, ItemType};
    ///
    /// let input = ItemInput {
    ///     amount: "1500".into(),
    ///     kind: "Expense".into(),
    ///     event: "Groceries".into(),
    ///     memo: Some("  ".into()),
    /// };
    /// let fields = ItemFields::parse(&input).unwrap();
    /// assert_eq!(fields.amount.get(), 1500);
    /// assert_eq!(fields.kind, ItemType::Expense);
    /// assert_eq!(fields.memo, None);
    /// ```
    pub fn parse(input: &ItemInput) -> Result<Self, ItemValidationError> {
        let amount = input.amount.trim();
        let kind = input.kind.trim();
        let event = input.event.trim();
        if amount.is_empty() || kind.is_empty() || event.is_empty() {
            return Err(ItemValidationError::MissingFields);
        }

        let kind = kind
            .parse::<ItemType>()
            .map_err(|_| ItemValidationError::InvalidType)?;

        let amount = amount
            .parse::<i64>()
            .ok()
            .and_then(Amount::new)
            .ok_or(ItemValidationError::InvalidAmount)?;

        let memo = input
            .memo
            .as_deref()
            .map(str::trim)
            .filter(|memo| !memo.is_empty())
            .map(str::to_owned);

        Ok(Self {
            amount,
            kind,
            event: event.to_owned(),
            memo,
        })
    }
}

/// Entry ready for insertion; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub owner: UserId,
    pub fields: ItemFields,
    pub created_at: DateTime<Utc>,
}

/// Persisted ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    id: ItemId,
    #[serde(skip)]
    owner: UserId,
    amount: Amount,
    #[serde(rename = "type")]
    kind: ItemType,
    event: String,
    memo: Option<String>,
    created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: ItemId, owner: UserId, fields: ItemFields, created_at: DateTime<Utc>) -> Self {
        let ItemFields {
            amount,
            kind,
            event,
            memo,
        } = fields;
        Self {
            id,
            owner,
            amount,
            kind,
            event,
            memo,
            created_at,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn kind(&self) -> ItemType {
        self.kind
    }

    pub fn event(&self) -> &str {
        self.event.as_str()
    }

    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the mutable fields, leaving id, owner, and timestamp intact.
    pub fn with_fields(self, fields: ItemFields) -> Self {
        Self::new(self.id, self.owner, fields, self.created_at)
    }

    /// Current values as a form, for prefilling an edit view.
    pub fn to_input(&self) -> ItemInput {
        ItemInput {
            amount: self.amount.get().to_string(),
            kind: self.kind.as_str().to_owned(),
            event: self.event.clone(),
            memo: self.memo.clone(),
        }
    }
}
