use crate::utils::constants::*;
use std::collections::HashMap;

/// One row of a fetched sheet, keyed by header label.
pub type RawRow = HashMap<String, String>;

/// Optional attribute lines of the details fragment, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Category,
    Genre,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Holiday,
    Notes,
    Reservation,
    Payment,
    Contact,
    Address,
}

impl Attribute {
    pub const ALL: [Attribute; 15] = [
        Attribute::Category,
        Attribute::Genre,
        Attribute::Monday,
        Attribute::Tuesday,
        Attribute::Wednesday,
        Attribute::Thursday,
        Attribute::Friday,
        Attribute::Saturday,
        Attribute::Sunday,
        Attribute::Holiday,
        Attribute::Notes,
        Attribute::Reservation,
        Attribute::Payment,
        Attribute::Contact,
        Attribute::Address,
    ];

    /// Column label in the sheet, also used as the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Category => COLUMN_CATEGORY,
            Attribute::Genre => COLUMN_GENRE,
            Attribute::Monday => COLUMN_MONDAY,
            Attribute::Tuesday => COLUMN_TUESDAY,
            Attribute::Wednesday => COLUMN_WEDNESDAY,
            Attribute::Thursday => COLUMN_THURSDAY,
            Attribute::Friday => COLUMN_FRIDAY,
            Attribute::Saturday => COLUMN_SATURDAY,
            Attribute::Sunday => COLUMN_SUNDAY,
            Attribute::Holiday => COLUMN_HOLIDAY,
            Attribute::Notes => COLUMN_NOTES,
            Attribute::Reservation => COLUMN_RESERVATION,
            Attribute::Payment => COLUMN_PAYMENT,
            Attribute::Contact => COLUMN_CONTACT,
            Attribute::Address => COLUMN_ADDRESS,
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Opening hours per weekday plus public holidays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyHours {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
    pub holiday: Option<String>,
}

/// A sheet row resolved into the known columns.
///
/// Every field holds trimmed, non-empty text or `None`. Sheets that lack a
/// column simply leave the field empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetRow {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub name: Option<String>,
    pub shop_name: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub hours: WeeklyHours,
    pub notes: Option<String>,
    pub reservation: Option<String>,
    pub payment: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
    pub related_info: Option<String>,
    pub map_link: Option<String>,
}

impl SheetRow {
    pub fn from_raw(raw: &RawRow) -> Self {
        let cell = |column: &str| -> Option<String> {
            raw.get(column)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            latitude: cell(COLUMN_LATITUDE),
            longitude: cell(COLUMN_LONGITUDE),
            name: cell(COLUMN_NAME),
            shop_name: cell(COLUMN_SHOP_NAME),
            category: cell(COLUMN_CATEGORY),
            genre: cell(COLUMN_GENRE),
            hours: WeeklyHours {
                monday: cell(COLUMN_MONDAY),
                tuesday: cell(COLUMN_TUESDAY),
                wednesday: cell(COLUMN_WEDNESDAY),
                thursday: cell(COLUMN_THURSDAY),
                friday: cell(COLUMN_FRIDAY),
                saturday: cell(COLUMN_SATURDAY),
                sunday: cell(COLUMN_SUNDAY),
                holiday: cell(COLUMN_HOLIDAY),
            },
            notes: cell(COLUMN_NOTES),
            reservation: cell(COLUMN_RESERVATION),
            payment: cell(COLUMN_PAYMENT),
            contact: cell(COLUMN_CONTACT),
            address: cell(COLUMN_ADDRESS),
            related_info: cell(COLUMN_RELATED_INFO),
            map_link: cell(COLUMN_MAP_LINK),
        }
    }

    /// Display title: the name column, then the shop name column.
    pub fn title(&self) -> &str {
        self.name
            .as_deref()
            .or(self.shop_name.as_deref())
            .unwrap_or("")
    }

    pub fn attribute(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::Category => &self.category,
            Attribute::Genre => &self.genre,
            Attribute::Monday => &self.hours.monday,
            Attribute::Tuesday => &self.hours.tuesday,
            Attribute::Wednesday => &self.hours.wednesday,
            Attribute::Thursday => &self.hours.thursday,
            Attribute::Friday => &self.hours.friday,
            Attribute::Saturday => &self.hours.saturday,
            Attribute::Sunday => &self.hours.sunday,
            Attribute::Holiday => &self.hours.holiday,
            Attribute::Notes => &self.notes,
            Attribute::Reservation => &self.reservation,
            Attribute::Payment => &self.payment,
            Attribute::Contact => &self.contact,
            Attribute::Address => &self.address,
        };
        value.as_deref()
    }

    /// Present attributes in display order.
    pub fn present_attributes(&self) -> impl Iterator<Item = (Attribute, &str)> + '_ {
        Attribute::ALL
            .iter()
            .filter_map(move |&attribute| self.attribute(attribute).map(|value| (attribute, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_raw_trims_and_drops_empty_cells() {
        let row = SheetRow::from_raw(&raw(&[
            ("北緯", " 38.05 "),
            ("東経", "138.4"),
            ("名称", "   "),
            ("店名", "Shop B"),
            ("補足", ""),
            ("unknown", "ignored"),
        ]));

        assert_eq!(row.latitude.as_deref(), Some("38.05"));
        assert_eq!(row.name, None);
        assert_eq!(row.notes, None);
        assert_eq!(row.title(), "Shop B");
    }

    #[test]
    fn test_title_prefers_name_column() {
        let row = SheetRow::from_raw(&raw(&[("名称", "Shop A"), ("店名", "Shop B")]));
        assert_eq!(row.title(), "Shop A");

        let empty = SheetRow::from_raw(&raw(&[]));
        assert_eq!(empty.title(), "");
    }

    #[test]
    fn test_present_attributes_follow_display_order() {
        let row = SheetRow::from_raw(&raw(&[
            ("所在地", "佐渡市"),
            ("月", "10-17"),
            ("カテゴリー", "和食"),
        ]));

        let present: Vec<_> = row.present_attributes().collect();
        assert_eq!(
            present,
            vec![
                (Attribute::Category, "和食"),
                (Attribute::Monday, "10-17"),
                (Attribute::Address, "佐渡市"),
            ]
        );
    }

    #[test]
    fn test_attribute_labels_are_unique() {
        let labels: std::collections::HashSet<_> =
            Attribute::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), Attribute::ALL.len());
    }
}
