use chrono::{DateTime, Utc};

/// "March 20, 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// "March 20, 2024, 09:05 AM"
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y, %I:%M %p").to_string()
}

/// "09:05 AM"
pub fn format_time(date: &DateTime<Utc>) -> String {
    date.format("%I:%M %p").to_string()
}

/// "new york city" -> "New York City"
pub fn capitalize_words(s: &str) -> String {
    s.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_dates() {
        let date = Utc.with_ymd_and_hms(2024, 3, 20, 9, 5, 0).unwrap();
        assert_eq!(format_date(&date), "March 20, 2024");
        assert_eq!(format_time(&date), "09:05 AM");
        assert_eq!(format_date_time(&date), "March 20, 2024, 09:05 AM");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("nEW yORK  city"), "New York  City");
    }
}
