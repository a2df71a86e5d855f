use serde::{Deserialize, Serialize};

/// User-visible message, one per failed category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub category: String,
    pub message: String,
}

impl Notice {
    pub fn load_failed(category: &str) -> Self {
        Self {
            category: category.to_string(),
            message: format!("{} のデータの読み込みに失敗しました。", category),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Why the one-shot position request did not yield a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeolocationFailure {
    PermissionDenied,
    Unsupported,
}

impl GeolocationFailure {
    pub fn message(&self) -> &'static str {
        match self {
            GeolocationFailure::PermissionDenied => "現在地の取得に失敗しました。",
            GeolocationFailure::Unsupported => "このブラウザは位置情報サービスに対応していません。",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failed_notice() {
        let notice = Notice::load_failed("販売");
        assert_eq!(notice.category, "販売");
        assert_eq!(notice.to_string(), "販売 のデータの読み込みに失敗しました。");
    }

    #[test]
    fn test_geolocation_messages() {
        assert_eq!(
            GeolocationFailure::PermissionDenied.message(),
            "現在地の取得に失敗しました。"
        );
        assert_ne!(
            GeolocationFailure::Unsupported.message(),
            GeolocationFailure::PermissionDenied.message()
        );
    }
}
