//! Plain-text rendering of view state.

use std::fmt::Write;

use weatherview_core::{
    ViewState,
    use_case::{
        DailyOutputData, HistoryOutputData, HomeOutputData, HourlyOutputData,
        SummarizationOutputData,
    },
};

const NOTHING_YET: &str = "Nothing to show yet.";

fn render<T>(state: &ViewState<T>, populated: impl FnOnce(&T) -> String) -> String {
    match state {
        ViewState::Empty => NOTHING_YET.to_string(),
        ViewState::Populated(data) => populated(data),
        ViewState::Failed(message) => format!("Error: {message}"),
    }
}

fn details(out: &mut String, rows: &[(&str, &str)]) {
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<14}{value}");
    }
}

pub fn home(state: &ViewState<HomeOutputData>) -> String {
    render(state, |home| {
        format!(
            "{} - {}\n  {}  {}\n  Low {} / High {}",
            home.city,
            home.date,
            home.temperature,
            home.condition,
            home.low_temperature,
            home.high_temperature
        )
    })
}

pub fn daily(state: &ViewState<DailyOutputData>) -> String {
    render(state, |daily| {
        let mut out = format!("7-day forecast for {}\n", daily.city);
        let rows = daily.weekdays.iter().zip(&daily.temperatures).zip(&daily.conditions);
        for ((weekday, temperature), condition) in rows {
            let marker = if *weekday == daily.selected_weekday { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} {weekday:<10}{temperature:>9}  {condition}");
        }

        let _ = writeln!(out, "\n{}", daily.selected_weekday);
        details(
            &mut out,
            &[
                ("Feels like", daily.feels_like.as_str()),
                ("UV index", daily.uv_index.as_str()),
                ("Wind", daily.wind_speed.as_str()),
                ("Cloud cover", daily.cloud_cover.as_str()),
                ("Precipitation", daily.precipitation.as_str()),
                ("Humidity", daily.humidity.as_str()),
            ],
        );
        out.trim_end().to_string()
    })
}

pub fn hourly(state: &ViewState<HourlyOutputData>) -> String {
    render(state, |hourly| {
        let mut out = format!(
            "Next {} hours in {} (low {}, high {})\n",
            hourly.hours.len(),
            hourly.city,
            hourly.low_temperature,
            hourly.high_temperature
        );
        let rows = hourly.hours.iter().zip(&hourly.temperatures).zip(&hourly.conditions);
        for ((hour, temperature), condition) in rows {
            let marker = if *hour == hourly.selected_hour { '>' } else { ' ' };
            let _ = writeln!(out, "{marker} {hour}{temperature:>9}  {condition}");
        }

        let _ = writeln!(out, "\n{}", hourly.selected_hour);
        details(
            &mut out,
            &[
                ("Feels like", hourly.feels_like.as_str()),
                ("UV index", hourly.uv_index.as_str()),
                ("Wind", hourly.wind_speed.as_str()),
                ("Cloud cover", hourly.cloud_cover.as_str()),
                ("Precipitation", hourly.precipitation.as_str()),
                ("Humidity", hourly.humidity.as_str()),
            ],
        );
        out.trim_end().to_string()
    })
}

pub fn summarization(state: &ViewState<SummarizationOutputData>) -> String {
    render(state, |summary| {
        let mut out = summary.summary.clone();
        for line in &summary.advice {
            let _ = write!(out, "\n  - {line}");
        }
        out
    })
}

pub fn history(state: &ViewState<HistoryOutputData>) -> String {
    match state {
        ViewState::Populated(history) if history.cities.is_empty() => {
            "No recently viewed cities.".to_string()
        }
        ViewState::Empty => NOTHING_YET.to_string(),
        ViewState::Failed(_) => format!("Error: {}", state.display_lines().join(" ")),
        ViewState::Populated(_) => state
            .display_lines()
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>2}. {line}", i + 1))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn checker() -> String {
    "Checker has nothing to show.".to_string()
}
