//! Sentence templates for answers and rejections.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::QueryError;
use crate::handlers::Answer;
use crate::intent::Intent;

/// The single fallback for unknown intents, missing entities, unknown
/// channels and empty lookups.
pub const APOLOGY: &str = "I'm sorry dave, I'm afraid I can't do that.";

pub const NO_MEMBERS: &str = "I'm sorry dave, there are no members in that channel.";

pub const NO_POSTERS: &str = "No users have posted to that channel";

/// Renders handler results as sentences. Timestamps use a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct ResponseFormatter {
    offset: FixedOffset,
}

impl ResponseFormatter {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn answer(&self, answer: &Answer) -> String {
        match answer {
            Answer::Members { channel, names } => match names.as_slice() {
                [] => format!("No users are in the {channel} channel"),
                [name] => format!("{name} is in the {channel} channel"),
                names => format!("{} are in the {channel} channel", join_names(names)),
            },
            Answer::NonPosters { channel, names } => match names.as_slice() {
                [] => format!("No users haven't posted to the {channel} channel"),
                [name] => format!("Only {name} hasn't posted to the {channel} channel"),
                names => format!("{} haven't posted to the {channel} channel", join_names(names)),
            },
            Answer::TopPosters { channel, names } => match names.as_slice() {
                [] => NO_POSTERS.to_string(),
                [name] => format!("{name} has made the most posts to the {channel} channel"),
                names => format!(
                    "{} have made the most posts to the {channel} channel",
                    join_names(names)
                ),
            },
            Answer::LastPost { channel, at } => {
                let scope = channel
                    .as_deref()
                    .map(|channel| format!(" to the {channel} channel"))
                    .unwrap_or_default();
                format!(
                    "The last time you posted{scope} was on {}",
                    format_timestamp(*at, self.offset)
                )
            }
            Answer::PostCount {
                channel,
                count,
                day: None,
            } => format!("You have posted to the {channel} channel {count} times"),
            Answer::PostCount {
                channel,
                count,
                day: Some(day),
            } => format!(
                "You posted to the {channel} channel {count} times on {}",
                format_day(*day)
            ),
        }
    }

    /// Sentence for a user-resolvable rejection. Store failures are not
    /// rendered here; callers surface them as errors.
    pub fn rejection(&self, intent: Intent, error: &QueryError) -> String {
        match (intent, error) {
            (_, QueryError::NoMembers) => NO_MEMBERS.to_string(),
            (Intent::GetHighestPoster, QueryError::NoData) => NO_POSTERS.to_string(),
            _ => APOLOGY.to_string(),
        }
    }
}

/// `1st`, `2nd`, `3rd`, `4th` … with 11, 12 and 13 always `th`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

pub fn join_names(names: &[String]) -> String {
    names.join(", ")
}

/// `Mar 14th`
pub fn format_day(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}", date.format("%b"), ordinal(date.day()))
}

/// `Mar 14th at 3:07 pm`, in `offset`.
pub fn format_timestamp(at: DateTime<Utc>, offset: FixedOffset) -> String {
    let local = at.with_timezone(&offset);
    format!(
        "{} at {}",
        format_day(local.date_naive()),
        local.format("%-I:%M %P")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter() -> ResponseFormatter {
        ResponseFormatter::new(FixedOffset::east_opt(0).unwrap())
    }

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn at(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn ordinals_follow_english_rules() {
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (22, "22nd"),
            (23, "23rd"),
            (24, "24th"),
            (30, "30th"),
            (31, "31st"),
            (111, "111th"),
        ];
        for (n, expected) in cases {
            assert_eq!(ordinal(n), expected, "ordinal({n})");
        }
    }

    #[test]
    fn timestamps_use_twelve_hour_clock() {
        let offset = FixedOffset::east_opt(0).unwrap();
        assert_eq!(format_timestamp(at("2024-03-14T15:07:00Z"), offset), "Mar 14th at 3:07 pm");
        assert_eq!(format_timestamp(at("2024-01-01T00:05:00Z"), offset), "Jan 1st at 12:05 am");
        assert_eq!(format_timestamp(at("2024-11-12T12:00:00Z"), offset), "Nov 12th at 12:00 pm");
    }

    #[test]
    fn timestamps_shift_into_the_configured_offset() {
        let minus_seven = FixedOffset::west_opt(7 * 3600).unwrap();
        assert_eq!(
            format_timestamp(at("2024-03-15T03:30:00Z"), minus_seven),
            "Mar 14th at 8:30 pm"
        );
    }

    #[test]
    fn member_lists_agree_in_number() {
        let f = formatter();
        let answer = |list: &[&str]| Answer::Members {
            channel: "dev".to_string(),
            names: names(list),
        };

        assert_eq!(f.answer(&answer(&[])), "No users are in the dev channel");
        assert_eq!(f.answer(&answer(&["Ann"])), "Ann is in the dev channel");
        assert_eq!(
            f.answer(&answer(&["Ann", "Bob", "Cy"])),
            "Ann, Bob, Cy are in the dev channel"
        );
    }

    #[test]
    fn non_poster_lists_agree_in_number() {
        let f = formatter();
        let answer = |list: &[&str]| Answer::NonPosters {
            channel: "dev".to_string(),
            names: names(list),
        };

        assert_eq!(f.answer(&answer(&[])), "No users haven't posted to the dev channel");
        assert_eq!(f.answer(&answer(&["Bob"])), "Only Bob hasn't posted to the dev channel");
        assert_eq!(
            f.answer(&answer(&["Ann", "Bob"])),
            "Ann, Bob haven't posted to the dev channel"
        );
    }

    #[test]
    fn top_poster_phrasing() {
        let f = formatter();
        let answer = |list: &[&str]| Answer::TopPosters {
            channel: "general".to_string(),
            names: names(list),
        };

        assert_eq!(f.answer(&answer(&[])), NO_POSTERS);
        assert_eq!(
            f.answer(&answer(&["Ann"])),
            "Ann has made the most posts to the general channel"
        );
        assert_eq!(
            f.answer(&answer(&["Ann", "Bob"])),
            "Ann, Bob have made the most posts to the general channel"
        );
    }

    #[test]
    fn last_post_mentions_channel_only_when_scoped() {
        let f = formatter();
        let when = at("2024-03-02T09:15:00Z");

        assert_eq!(
            f.answer(&Answer::LastPost { channel: None, at: when }),
            "The last time you posted was on Mar 2nd at 9:15 am"
        );
        assert_eq!(
            f.answer(&Answer::LastPost {
                channel: Some("random".to_string()),
                at: when
            }),
            "The last time you posted to the random channel was on Mar 2nd at 9:15 am"
        );
    }

    #[test]
    fn post_counts_with_and_without_day() {
        let f = formatter();
        assert_eq!(
            f.answer(&Answer::PostCount {
                channel: "General".to_string(),
                count: 0,
                day: None
            }),
            "You have posted to the General channel 0 times"
        );
        assert_eq!(
            f.answer(&Answer::PostCount {
                channel: "General".to_string(),
                count: 3,
                day: NaiveDate::from_ymd_opt(2024, 3, 13),
            }),
            "You posted to the General channel 3 times on Mar 13th"
        );
    }

    #[test]
    fn rejections_share_one_apology() {
        let f = formatter();
        for intent in [Intent::GetUsers, Intent::GetPostCount, Intent::Unknown] {
            assert_eq!(f.rejection(intent, &QueryError::MissingEntity("channel")), APOLOGY);
            assert_eq!(
                f.rejection(intent, &QueryError::ChannelNotFound("x".to_string())),
                APOLOGY
            );
        }
        assert_eq!(f.rejection(Intent::GetPostTime, &QueryError::NoData), APOLOGY);
        assert_eq!(f.rejection(Intent::GetHighestPoster, &QueryError::NoData), NO_POSTERS);
        assert_eq!(f.rejection(Intent::GetUsers, &QueryError::NoMembers), NO_MEMBERS);
    }
}
