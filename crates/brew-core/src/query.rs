//! Filtering, aggregation and formatting over logged entries.
//!
//! Every function here is pure: it reads a snapshot of entries and returns a
//! new collection or value. The topic filter and the interval filter commute;
//! [`entries_matching`] applies the topic filter first.

use std::collections::BTreeSet;

use chrono::{DateTime, TimeZone};

use crate::entry::{DurationComponent, Entry};
use crate::interval::{Interval, WeekStart};
use crate::view::Selection;

/// Entries with at least one topic in `topics`.
///
/// An empty `topics` set means no filtering: every entry is returned,
/// untagged ones included. Input order is preserved.
pub fn entries_with_topics<'a, I>(entries: I, topics: &BTreeSet<String>) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.has_any_topic(topics))
        .collect()
}

/// Entries whose end time falls in `interval` around `now`, newest first.
///
/// Weeks start on Sunday.
pub fn entries_in_interval<'a, I, Tz>(
    entries: I,
    interval: Interval,
    now: &DateTime<Tz>,
) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
    Tz: TimeZone,
{
    entries_in_interval_from(entries, interval, now, WeekStart::Sunday)
}

/// Like [`entries_in_interval`] with an explicit first day of the week.
pub fn entries_in_interval_from<'a, I, Tz>(
    entries: I,
    interval: Interval,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
    Tz: TimeZone,
{
    let mut matched: Vec<&Entry> = entries
        .into_iter()
        .filter(|entry| interval.contains(entry.end_time(), now, week_start))
        .collect();
    matched.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    matched
}

/// Entries matching both halves of `selection`, newest first.
pub fn entries_matching<'a, I, Tz>(
    entries: I,
    selection: &Selection,
    now: &DateTime<Tz>,
    week_start: WeekStart,
) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
    Tz: TimeZone,
{
    let tagged = entries_with_topics(entries, &selection.topics);
    entries_in_interval_from(tagged, selection.interval, now, week_start)
}

/// Sum of focused and unfocused seconds.
pub fn total_seconds<'a, I>(entries: I) -> i64
where
    I: IntoIterator<Item = &'a Entry>,
{
    component_seconds(entries, DurationComponent::Total)
}

/// Sum of one duration component.
pub fn component_seconds<'a, I>(entries: I, component: DurationComponent) -> i64
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .map(|e| e.seconds(component))
        .fold(0, i64::saturating_add)
}

/// Formats seconds with two units of precision at most.
///
/// - under a minute: `45 seconds`
/// - under an hour: `2 minutes, 5 seconds`
/// - otherwise: `1 hours, 2 minutes`
pub fn format_duration(seconds: i64) -> String {
    if seconds < 60 {
        format!("{seconds} seconds")
    } else if seconds < 3600 {
        format!("{} minutes, {} seconds", seconds / 60, seconds % 60)
    } else {
        format!("{} hours, {} minutes", seconds / 3600, (seconds / 60) % 60)
    }
}

/// Summary sentence for a topic and interval selection.
///
/// `now` supplies the month or year named by the interval phrase.
pub fn describe_selection<Tz: TimeZone>(
    topics: &BTreeSet<String>,
    interval: Interval,
    total_seconds: i64,
    now: &DateTime<Tz>,
) -> String {
    let duration = format_duration(total_seconds);
    let phrase = interval.phrase(now);
    if topics.is_empty() {
        format!("You have spent {duration} working {phrase}")
    } else {
        let topics = topics.iter().map(String::as_str).collect::<Vec<_>>().join(", ");
        format!("You have spent {duration} working on: {topics} {phrase}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-03-12T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn entry(name: &str, start: DateTime<Utc>, topics: &[&str], unfocused: i64) -> Entry {
        Entry::new(name, start, topics.iter().map(ToString::to_string).collect())
            .with_durations(0, unfocused)
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    fn names(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    fn sample() -> Vec<Entry> {
        let now = now();
        vec![
            entry("ab", now - Duration::hours(3), &["A", "B"], 60),
            entry("c", now - Duration::hours(2), &["C"], 60),
            entry("untagged", now - Duration::hours(1), &[], 60),
            entry("old", now - Duration::days(40), &["A"], 60),
        ]
    }

    #[test]
    fn empty_topic_set_matches_everything() {
        let entries = sample();
        let matched = entries_with_topics(&entries, &set(&[]));
        assert_eq!(matched.len(), entries.len());
    }

    #[test]
    fn topic_filter_is_logical_or() {
        let entries = sample();
        let matched = entries_with_topics(&entries, &set(&["B", "C"]));
        assert_eq!(names(&matched), vec!["ab", "c"]);
        for entry in &matched {
            assert!(entry.topics.iter().any(|t| t == "B" || t == "C"));
        }
    }

    #[test]
    fn untagged_entries_never_match_a_topic_query() {
        let entries = sample();
        let matched = entries_with_topics(&entries, &set(&["A"]));
        assert_eq!(names(&matched), vec!["ab", "old"]);
    }

    #[test]
    fn all_interval_reorders_newest_first() {
        let entries = sample();
        let matched = entries_in_interval(&entries, Interval::All, &now());
        assert_eq!(matched.len(), entries.len());
        assert_eq!(names(&matched), vec!["untagged", "c", "ab", "old"]);
    }

    #[test]
    fn day_interval_classifies_by_end_time() {
        let today = DateTime::parse_from_rfc3339("2025-03-12T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let entries = vec![
            // started yesterday, ended today
            entry("overnight", today - Duration::minutes(30), &[], 3600),
            // started and ended yesterday
            entry("yesterday", today - Duration::hours(3), &[], 3600),
            entry("late", today + Duration::hours(23), &[], 60),
        ];
        let matched = entries_in_interval(&entries, Interval::Day, &now());
        assert_eq!(names(&matched), vec!["late", "overnight"]);
    }

    #[test]
    fn month_and_year_intervals() {
        let entries = sample();
        let month = entries_in_interval(&entries, Interval::Month, &now());
        assert_eq!(names(&month), vec!["untagged", "c", "ab"]);
        let year = entries_in_interval(&entries, Interval::Year, &now());
        assert_eq!(names(&year), vec!["untagged", "c", "ab", "old"]);
    }

    #[test]
    fn selection_combines_both_filters() {
        let entries = sample();
        let selection = Selection::new(Interval::Month, set(&["A"]));
        let matched = entries_matching(&entries, &selection, &now(), WeekStart::Sunday);
        assert_eq!(names(&matched), vec!["ab"]);

        let everything = Selection::default().with_interval(Interval::All);
        let matched = entries_matching(&entries, &everything, &now(), WeekStart::Sunday);
        assert_eq!(matched.len(), 4);
    }

    #[test]
    fn empty_results_are_not_errors() {
        let entries: Vec<Entry> = Vec::new();
        assert!(entries_in_interval(&entries, Interval::Day, &now()).is_empty());
        assert_eq!(total_seconds(&entries), 0);
    }

    #[test]
    fn aggregation_sums_both_components() {
        let start = now();
        let entries = vec![
            Entry::new("a", start, vec![]).with_durations(10, 20),
            Entry::new("b", start, vec![]).with_durations(5, 0),
        ];
        assert_eq!(total_seconds(&entries), 35);
        assert_eq!(component_seconds(&entries, DurationComponent::Focused), 15);
        assert_eq!(component_seconds(&entries, DurationComponent::Unfocused), 20);
    }

    #[test]
    fn oversized_entries_saturate_instead_of_panicking() {
        let entries = vec![
            Entry::new("a", now(), vec![]).with_durations(i64::MAX, 1),
            Entry::new("b", now(), vec![]).with_durations(0, 9_000_000_000_000_000),
        ];
        assert_eq!(total_seconds(&entries), i64::MAX);
        assert_eq!(component_seconds(&entries, DurationComponent::Focused), i64::MAX);

        let matched = entries_in_interval(&entries, Interval::All, &now());
        assert_eq!(matched.len(), 2);
        assert!(entries_in_interval(&entries, Interval::Day, &now()).is_empty());
    }

    #[test]
    fn format_duration_tiers() {
        assert_eq!(format_duration(0), "0 seconds");
        assert_eq!(format_duration(45), "45 seconds");
        assert_eq!(format_duration(59), "59 seconds");
        assert_eq!(format_duration(60), "1 minutes, 0 seconds");
        assert_eq!(format_duration(125), "2 minutes, 5 seconds");
        assert_eq!(format_duration(3599), "59 minutes, 59 seconds");
        assert_eq!(format_duration(3600), "1 hours, 0 minutes");
        assert_eq!(format_duration(3725), "1 hours, 2 minutes");
        assert_eq!(format_duration(90_061), "25 hours, 1 minutes");
    }

    #[test]
    fn describe_without_topics_omits_topic_clause() {
        let sentence = describe_selection(&set(&[]), Interval::Day, 45, &now());
        assert_eq!(sentence, "You have spent 45 seconds working today");
    }

    #[test]
    fn describe_each_interval_phrase() {
        let topics = set(&["Study"]);
        let cases = [
            (Interval::Day, "today"),
            (Interval::Week, "this week"),
            (Interval::Month, "in March"),
            (Interval::Year, "in 2025"),
            (Interval::All, "in total"),
        ];
        for (interval, phrase) in cases {
            assert_eq!(
                describe_selection(&topics, interval, 3725, &now()),
                format!("You have spent 1 hours, 2 minutes working on: Study {phrase}")
            );
        }
    }

    #[test]
    fn describe_joins_multiple_topics() {
        let sentence = describe_selection(&set(&["Study", "Math"]), Interval::Week, 125, &now());
        assert_eq!(
            sentence,
            "You have spent 2 minutes, 5 seconds working on: Math, Study this week"
        );
    }
}
