use std::time::Duration;

/// Discord mention for an opaque user ID.
pub fn mention(user_id: &str) -> String {
    format!("<@{}>", user_id)
}

/// Compact play time: "<1m", "42m", "3h 07m", "2d 4h".
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let days = total_minutes / (60 * 24);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {:02}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m", minutes)
    } else {
        "<1m".to_string()
    }
}

/// Mentions joined with commas, plus "and N more" when the list was cut.
pub fn format_player_list(user_ids: &[String], overflow_count: usize) -> String {
    let mut text = user_ids
        .iter()
        .map(|id| mention(id))
        .collect::<Vec<_>>()
        .join(", ");

    if overflow_count > 0 {
        if text.is_empty() {
            text = format!("{} players", overflow_count);
        } else {
            text.push_str(&format!(" and {} more", overflow_count));
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_pick_the_largest_sensible_unit() {
        assert_eq!(format_duration(Duration::from_secs(30)), "<1m");
        assert_eq!(format_duration(Duration::from_secs(42 * 60)), "42m");
        assert_eq!(format_duration(Duration::from_secs(3 * 3600 + 7 * 60)), "3h 07m");
        assert_eq!(format_duration(Duration::from_secs(52 * 3600)), "2d 4h");
    }

    #[test]
    fn player_list_mentions_and_summarises_overflow() {
        let ids = vec!["1".to_string(), "2".to_string()];

        assert_eq!(format_player_list(&ids, 0), "<@1>, <@2>");
        assert_eq!(format_player_list(&ids, 3), "<@1>, <@2> and 3 more");
        assert_eq!(format_player_list(&[], 0), "");
        assert_eq!(format_player_list(&[], 4), "4 players");
    }
}
