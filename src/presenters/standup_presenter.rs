use chrono::{DateTime, Datelike, Utc, Weekday};
use rand::seq::IndexedRandom;
use rand::Rng;

use super::clock::Clock;
use crate::db::entities::standup;

pub const FLOOR_FRIDAY_CLOSING: &str = "STRETCH! It's Floor Friday!";

pub const STANDUP_CLOSINGS: &[&str] = &[
    "STRETCH!",
    "STRETCH!!!",
    "Stretch it out!",
    "Reach for the sky!",
    "Touch your toes!",
    "Shake it out!",
    "Roll those shoulders!",
    "Get up, stand up, stretch!",
];

const EMAIL_TIME_FORMAT: &str = "%-I:%M%p %A %b %-d, %Y";

/// Formats an email timestamp as e.g. `12:00PM Monday Jan 1, 2001` in the clock's local time.
pub fn format_email_time<C: Clock + ?Sized>(clock: &C, instant: DateTime<Utc>) -> String {
    clock.localize(instant).format(EMAIL_TIME_FORMAT).to_string()
}

/// The fields of a standup that the presenter reads.
pub trait StandupRecord {
    fn title(&self) -> &str;
    fn subject_prefix(&self) -> &str;
    fn to_address(&self) -> &str;
    fn one_click_post(&self) -> bool;
    fn closing_message(&self) -> Option<&str>;
    /// Raw newline-delimited list.
    fn image_urls(&self) -> &str;
    fn image_days(&self) -> Vec<&str>;
    fn last_email_time(&self) -> Option<DateTime<Utc>>;
}

impl StandupRecord for standup::Model {
    fn title(&self) -> &str {
        &self.title
    }

    fn subject_prefix(&self) -> &str {
        &self.subject_prefix
    }

    fn to_address(&self) -> &str {
        &self.to_address
    }

    fn one_click_post(&self) -> bool {
        self.one_click_post
    }

    fn closing_message(&self) -> Option<&str> {
        self.closing_message.as_deref()
    }

    fn image_urls(&self) -> &str {
        &self.image_urls
    }

    fn image_days(&self) -> Vec<&str> {
        self.image_day_list()
    }

    fn last_email_time(&self) -> Option<DateTime<Utc>> {
        self.last_email_time
    }
}

/// Picks one candidate uniformly, or `None` when there are none.
pub fn pick<'a, T, R: Rng + ?Sized>(candidates: &'a [T], rng: &mut R) -> Option<&'a T> {
    candidates.choose(rng)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// True when `entry` names `day`, either in full or as a three-letter abbreviation.
pub fn weekday_matches(entry: &str, day: Weekday) -> bool {
    let entry = entry.trim();
    let full = weekday_name(day);
    entry.eq_ignore_ascii_case(full) || entry.eq_ignore_ascii_case(&full[..3])
}

/// Derives the display strings of a standup page from a standup record.
pub struct StandupPresenter<'a, S: StandupRecord + ?Sized, C: Clock + ?Sized> {
    standup: &'a S,
    clock: &'a C,
}

impl<'a, S: StandupRecord + ?Sized, C: Clock + ?Sized> StandupPresenter<'a, S, C> {
    pub fn new(standup: &'a S, clock: &'a C) -> Self {
        Self { standup, clock }
    }

    pub fn closing_message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        if let Some(message) = self.standup.closing_message() {
            if !message.trim().is_empty() {
                return message.to_string();
            }
        }

        if self.clock.today().weekday() == Weekday::Fri {
            return FLOOR_FRIDAY_CLOSING.to_string();
        }

        pick(STANDUP_CLOSINGS, rng)
            .copied()
            .unwrap_or(STANDUP_CLOSINGS[0])
            .to_string()
    }

    pub fn closing_image<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        let today = self.clock.today().weekday();
        let selected = self
            .standup
            .image_days()
            .iter()
            .any(|entry| weekday_matches(entry, today));
        if !selected {
            return None;
        }

        let urls: Vec<&str> = self
            .standup
            .image_urls()
            .lines()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .collect();
        pick(urls.as_slice(), rng).map(|url| url.to_string())
    }

    pub fn last_email_time_message(&self) -> Option<String> {
        self.standup.last_email_time().map(|sent| {
            format!("Last standup email sent: {}", format_email_time(self.clock, sent))
        })
    }

    pub fn create_post_confirm_message(&self) -> &'static str {
        if self.standup.one_click_post() {
            "You are about to send today's stand up email. Continue?"
        } else {
            "This will clear the board and create a new one for tomorrow, you can always get back to this post under the \"Posts\" menu in the header. Continue?"
        }
    }

    pub fn create_post_button_text(&self) -> &'static str {
        if self.standup.one_click_post() {
            "Send Email"
        } else {
            "Create Post"
        }
    }

    pub fn create_post_sender_field_placeholder(&self) -> &'static str {
        if self.standup.one_click_post() {
            "Standup host(s)"
        } else {
            "Blogger Name(s)"
        }
    }

    pub fn create_post_subject_field_placeholder(&self) -> &'static str {
        if self.standup.one_click_post() {
            "Email subject"
        } else {
            "Post Title (eg: Best Standup Ever)"
        }
    }

    // Forwarded record fields.

    pub fn title(&self) -> &'a str {
        self.standup.title()
    }

    pub fn subject_prefix(&self) -> &'a str {
        self.standup.subject_prefix()
    }

    pub fn to_address(&self) -> &'a str {
        self.standup.to_address()
    }

    pub fn one_click_post(&self) -> bool {
        self.standup.one_click_post()
    }

    pub fn image_urls(&self) -> &'a str {
        self.standup.image_urls()
    }

    pub fn image_days(&self) -> Vec<&'a str> {
        self.standup.image_days()
    }

    pub fn last_email_time(&self) -> Option<DateTime<Utc>> {
        self.standup.last_email_time()
    }
}
