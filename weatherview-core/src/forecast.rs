//! Weekday alignment for the seven-day forecast.
//!
//! A [`DailyWeatherSet`] is ordered today-first. The UI, however, lets the
//! user pick a weekday by name, so the selection has to be mapped back onto
//! an offset from today in the set's own timezone.

use chrono::Weekday;

use crate::model::{DailyWeatherSet, WEEK_SIZE, WeatherSnapshot};

/// Offset of `selected` from `current` in days, always in `0..7`.
pub fn weekday_index(selected: Weekday, current: Weekday) -> usize {
    let diff = selected.num_days_from_monday() as i64 - current.num_days_from_monday() as i64;
    diff.rem_euclid(WEEK_SIZE as i64) as usize
}

/// The canonical weekday sequence rotated so that it starts at `current`.
pub fn rotated_weekdays(current: Weekday) -> [Weekday; WEEK_SIZE] {
    let mut next = current;
    std::array::from_fn(|_| {
        let day = next;
        next = next.succ();
        day
    })
}

/// A daily set paired with its weekday labels and the selected day.
#[derive(Debug, Clone, Copy)]
pub struct AlignedWeek<'a> {
    pub weekdays: [Weekday; WEEK_SIZE],
    pub days: &'a [WeatherSnapshot; WEEK_SIZE],
    pub selected_index: usize,
}

impl<'a> AlignedWeek<'a> {
    pub fn selected(&self) -> &'a WeatherSnapshot {
        &self.days[self.selected_index]
    }

    /// `(weekday, reading)` pairs, today first.
    pub fn entries(&self) -> impl Iterator<Item = (Weekday, &'a WeatherSnapshot)> + '_ {
        self.weekdays.iter().copied().zip(self.days.iter())
    }
}

pub fn align(set: &DailyWeatherSet, selected: Weekday, current: Weekday) -> AlignedWeek<'_> {
    AlignedWeek {
        weekdays: rotated_weekdays(current),
        days: set.days(),
        selected_index: weekday_index(selected, current),
    }
}
