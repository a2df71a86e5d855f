/// Column labels in the published sheets
pub const COLUMN_LATITUDE: &str = "北緯";
pub const COLUMN_LONGITUDE: &str = "東経";
pub const COLUMN_NAME: &str = "名称";
pub const COLUMN_SHOP_NAME: &str = "店名";
pub const COLUMN_CATEGORY: &str = "カテゴリー";
pub const COLUMN_GENRE: &str = "ジャンル";
pub const COLUMN_MONDAY: &str = "月";
pub const COLUMN_TUESDAY: &str = "火";
pub const COLUMN_WEDNESDAY: &str = "水";
pub const COLUMN_THURSDAY: &str = "木";
pub const COLUMN_FRIDAY: &str = "金";
pub const COLUMN_SATURDAY: &str = "土";
pub const COLUMN_SUNDAY: &str = "日";
pub const COLUMN_HOLIDAY: &str = "祝";
pub const COLUMN_NOTES: &str = "補足";
pub const COLUMN_RESERVATION: &str = "予約";
pub const COLUMN_PAYMENT: &str = "支払";
pub const COLUMN_CONTACT: &str = "問い合わせ";
pub const COLUMN_ADDRESS: &str = "所在地";
pub const COLUMN_RELATED_INFO: &str = "関連情報";
pub const COLUMN_MAP_LINK: &str = "Google マップで見る";

/// Link text for the external map link line
pub const MAP_LINK_TEXT: &str = "Google マップで見る";

/// Spreadsheet export defaults
pub const DEFAULT_SPREADSHEET_ID: &str = "1DNAL3F57kW8r8awyMGc4PRcH52SPMffEpo8z1ZEFOow";
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";
pub const CSV_EXPORT_FORMAT: &str = "out:csv";

/// Initial map view (Sado island)
pub const DEFAULT_CENTER_LAT: f64 = 38.0682;
pub const DEFAULT_CENTER_LNG: f64 = 138.3716;
pub const DEFAULT_ZOOM: u8 = 10;
pub const FOCUS_ZOOM: u8 = 15;

/// Marker styling
pub const DEFAULT_MARKER_COLOR: &str = "black";
pub const HOVER_MARKER_COLOR: &str = "red";
pub const CURRENT_LOCATION_COLOR: &str = "gold";
pub const MARKER_STROKE_COLOR: &str = "black";
pub const MARKER_STROKE_WEIGHT: u8 = 2;
pub const MARKER_SCALE: u8 = 10;
pub const HOVER_MARKER_SCALE: u8 = 12;

/// Category sheets and their colors, in load order
pub const DEFAULT_CATEGORIES: [(&str, &str); 10] = [
    ("公共トイレ", "#ff5d00"),
    ("駐車場", "#ffab00"),
    ("スナック", "#b5ff00"),
    ("両津・相川地区", "#00ff00"),
    ("金井・佐和田・新穂・畑野・真野地区", "#00ffe2"),
    ("赤泊・羽茂・小木地区", "#00b9ff"),
    ("和食", "#2100f1"),
    ("中華", "#3d00f1"),
    ("洋食", "#ad00f1"),
    ("販売", "#f100a7"),
];

/// Configuration
pub const ENV_PREFIX: &str = "SHEET_MARKERS";
pub const ENV_SEPARATOR: &str = "__";

/// Geographic bounds
pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
