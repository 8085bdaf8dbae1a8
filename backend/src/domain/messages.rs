//! User-facing message catalogue.
//!
//! Every message shown to a client comes from [`Message`]. The locale is a
//! deployment setting; each message also has a stable `code` that adapters
//! expose alongside the localised text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported display languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Japanese, the product's original language.
    #[default]
    Ja,
    /// English.
    En,
}

/// Error returned when a locale tag is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}'; expected ja or en")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_ascii_lowercase();
        match tag.split(['-', '_']).next() {
            Some("ja") => Ok(Self::Ja),
            Some("en") => Ok(Self::En),
            _ => Err(UnsupportedLocale(s.to_owned())),
        }
    }
}

/// Short user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    LoginFieldsRequired,
    InvalidCredentials,
    RegisterFieldsRequired,
    PasswordMismatch,
    PasswordTooShort,
    EmailAlreadyRegistered,
    ItemFieldsRequired,
    InvalidItemType,
    InvalidAmount,
    ItemNotFound,
    InvalidTypeFilter,
    InvalidDateFilter,
    RequestFailed,
}

impl Message {
    /// Stable snake_case identifier for clients and tests.
    pub fn code(self) -> &'static str {
        match self {
            Self::LoginFieldsRequired => "login_fields_required",
            Self::InvalidCredentials => "invalid_credentials",
            Self::RegisterFieldsRequired => "register_fields_required",
            Self::PasswordMismatch => "password_mismatch",
            Self::PasswordTooShort => "password_too_short",
            Self::EmailAlreadyRegistered => "email_already_registered",
            Self::ItemFieldsRequired => "item_fields_required",
            Self::InvalidItemType => "invalid_item_type",
            Self::InvalidAmount => "invalid_amount",
            Self::ItemNotFound => "item_not_found",
            Self::InvalidTypeFilter => "invalid_type_filter",
            Self::InvalidDateFilter => "invalid_date_filter",
            Self::RequestFailed => "request_failed",
        }
    }

    /// Localised text for `locale`.
    pub fn text(self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ja => self.ja(),
            Locale::En => self.en(),
        }
    }

    fn ja(self) -> &'static str {
        match self {
            Self::LoginFieldsRequired => "メールアドレスとパスワードを入力してください",
            Self::InvalidCredentials => "メールアドレスまたはパスワードが正しくありません",
            Self::RegisterFieldsRequired => "すべての項目を入力してください",
            Self::PasswordMismatch => "パスワードが一致しません",
            Self::PasswordTooShort => "パスワードは6文字以上で入力してください",
            Self::EmailAlreadyRegistered => "このメールアドレスは既に登録されています",
            Self::ItemFieldsRequired => "金額、収支区分、項目名は必須です",
            Self::InvalidItemType => "収支区分は「収入」または「支出」を選択してください",
            Self::InvalidAmount => "金額は正の数値を入力してください",
            Self::ItemNotFound => "項目が見つかりません",
            Self::InvalidTypeFilter => "収支区分の絞り込みが正しくありません",
            Self::InvalidDateFilter => "日付はYYYY-MM-DD形式で入力してください",
            Self::RequestFailed => "処理に失敗しました",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Self::LoginFieldsRequired => "Enter your email address and password",
            Self::InvalidCredentials => "Incorrect email address or password",
            Self::RegisterFieldsRequired => "All fields are required",
            Self::PasswordMismatch => "Passwords do not match",
            Self::PasswordTooShort => "Password must be at least 6 characters",
            Self::EmailAlreadyRegistered => "This email address is already registered",
            Self::ItemFieldsRequired => "Amount, type and event are required",
            Self::InvalidItemType => "Type must be Income or Expense",
            Self::InvalidAmount => "Amount must be a positive whole number",
            Self::ItemNotFound => "Item not found",
            Self::InvalidTypeFilter => "Type filter must be all, Income or Expense",
            Self::InvalidDateFilter => "Dates must use the YYYY-MM-DD format",
            Self::RequestFailed => "The request could not be completed",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const ALL: [Message; 13] = [
        Message::LoginFieldsRequired,
        Message::InvalidCredentials,
        Message::RegisterFieldsRequired,
        Message::PasswordMismatch,
        Message::PasswordTooShort,
        Message::EmailAlreadyRegistered,
        Message::ItemFieldsRequired,
        Message::InvalidItemType,
        Message::InvalidAmount,
        Message::ItemNotFound,
        Message::InvalidTypeFilter,
        Message::InvalidDateFilter,
        Message::RequestFailed,
    ];

    #[rstest]
    #[case("ja", Locale::Ja)]
    #[case("ja-JP", Locale::Ja)]
    #[case("EN", Locale::En)]
    #[case("en_GB", Locale::En)]
    fn parses_locale_tags(#[case] raw: &str, #[case] expected: Locale) {
        assert_eq!(raw.parse::<Locale>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_locale() {
        assert!("fr".parse::<Locale>().is_err());
    }

    #[rstest]
    #[case(Locale::Ja)]
    #[case(Locale::En)]
    fn every_message_has_text(#[case] locale: Locale) {
        for message in ALL {
            assert!(!message.text(locale).trim().is_empty(), "{message} has no text");
        }
    }

    #[rstest]
    fn codes_are_unique() {
        let mut codes: Vec<_> = ALL.iter().map(|message| message.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), ALL.len());
    }
}
