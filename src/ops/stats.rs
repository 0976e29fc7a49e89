use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use serde::Serialize;

use crate::model::todo::{Priority, Todo};

/// Counts over the whole collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

pub fn compute_stats(todos: &[Todo], now: DateTime<Utc>) -> TodoStats {
    let mut stats = TodoStats {
        total: todos.len(),
        ..Default::default()
    };
    for todo in todos {
        if todo.completed {
            stats.completed += 1;
        } else {
            stats.active += 1;
        }
        if todo.is_overdue(now) {
            stats.overdue += 1;
        }
    }
    stats
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Productivity summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insights {
    pub completed_this_week: usize,
    /// Mean days from creation to last update over completed todos
    pub average_completion_days: i64,
    pub most_productive_day: Option<String>,
    pub priority_distribution: PriorityDistribution,
}

pub fn compute_insights(todos: &[Todo], now: DateTime<Utc>) -> Insights {
    let week_ago = now - Duration::days(7);
    let finished: Vec<(&Todo, DateTime<Utc>)> = todos
        .iter()
        .filter(|t| t.completed)
        .filter_map(|t| t.updated_at.map(|u| (t, u)))
        .collect();

    let completed_this_week = finished.iter().filter(|(_, u)| *u >= week_ago).count();

    let average_completion_days = if finished.is_empty() {
        0
    } else {
        let total_ms: i64 = finished
            .iter()
            .map(|(t, u)| (*u - t.created_at).num_milliseconds())
            .sum();
        let avg_days = total_ms as f64 / finished.len() as f64 / 86_400_000.0;
        // Halves round up, also for negative averages
        (avg_days + 0.5).floor() as i64
    };

    // Counts in first-seen order so ties go to the earliest weekday encountered
    let mut day_counts: Vec<(Weekday, usize)> = Vec::new();
    for (_, updated) in &finished {
        let day = updated.weekday();
        match day_counts.iter_mut().find(|(d, _)| *d == day) {
            Some((_, n)) => *n += 1,
            None => day_counts.push((day, 1)),
        }
    }
    let mut best: Option<(Weekday, usize)> = None;
    for (day, n) in day_counts {
        if best.is_none_or(|(_, b)| n > b) {
            best = Some((day, n));
        }
    }

    let mut priority_distribution = PriorityDistribution::default();
    for todo in todos {
        match todo.priority {
            Priority::High => priority_distribution.high += 1,
            Priority::Medium => priority_distribution.medium += 1,
            Priority::Low => priority_distribution.low += 1,
        }
    }

    Insights {
        completed_this_week,
        average_completion_days,
        most_productive_day: best.map(|(d, _)| weekday_name(d).to_string()),
        priority_distribution,
    }
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

/// Whole days from `now` until `due`, rounded up
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (due - now).num_milliseconds();
    (ms as f64 / 86_400_000.0).ceil() as i64
}

/// Relative due label: `today`, `tomorrow`, `yesterday`, `in N days`, `N days overdue`
pub fn due_label(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    relative_day_label(days_until(due, now))
}

/// Label for a signed day offset from today
pub fn relative_day_label(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        n if n > 0 => format!("in {} days", n),
        n => format!("{} days overdue", -n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        // 2025-06-02 is a Monday
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn todo(id: u64, priority: Priority) -> Todo {
        Todo {
            id,
            title: format!("Todo {}", id),
            description: String::new(),
            completed: false,
            created_at: at(1, 0),
            updated_at: None,
            priority,
            category: None,
            due_date: None,
        }
    }

    #[test]
    fn stats_counts_each_bucket() {
        let now = at(10, 12);
        let mut done = todo(1, Priority::Low);
        done.completed = true;
        let mut late = todo(2, Priority::High);
        late.due_date = Some(at(9, 0));
        let mut late_but_done = todo(3, Priority::High);
        late_but_done.completed = true;
        late_but_done.due_date = Some(at(9, 0));
        let open = todo(4, Priority::Medium);

        let stats = compute_stats(&[done, late, late_but_done, open], now);
        assert_eq!(
            stats,
            TodoStats {
                total: 4,
                active: 2,
                completed: 2,
                overdue: 1
            }
        );
    }

    #[test]
    fn insights_on_empty_collection() {
        let insights = compute_insights(&[], at(10, 0));
        assert_eq!(insights.completed_this_week, 0);
        assert_eq!(insights.average_completion_days, 0);
        assert_eq!(insights.most_productive_day, None);
        assert_eq!(insights.priority_distribution, PriorityDistribution::default());
    }

    #[test]
    fn insights_summarize_completions() {
        let now = at(12, 0);
        let mut a = todo(1, Priority::High);
        a.completed = true;
        a.updated_at = Some(at(3, 0)); // Tuesday, 2 days after creation
        let mut b = todo(2, Priority::Low);
        b.completed = true;
        b.updated_at = Some(at(10, 0)); // Tuesday, 9 days after creation
        let mut c = todo(3, Priority::Low);
        c.completed = true;
        c.updated_at = Some(at(11, 0)); // Wednesday
        let d = todo(4, Priority::Medium);

        let insights = compute_insights(&[a, b, c, d], now);
        assert_eq!(insights.completed_this_week, 2);
        // (2 + 9 + 10) / 3 = 7
        assert_eq!(insights.average_completion_days, 7);
        assert_eq!(insights.most_productive_day.as_deref(), Some("Tuesday"));
        assert_eq!(
            insights.priority_distribution,
            PriorityDistribution {
                high: 1,
                medium: 1,
                low: 2
            }
        );
    }

    #[test]
    fn negative_half_day_average_rounds_up() {
        // Updated twelve hours before it was created
        let mut t = todo(1, Priority::Low);
        t.completed = true;
        t.created_at = at(5, 12);
        t.updated_at = Some(at(5, 0));
        let insights = compute_insights(&[t], at(6, 0));
        assert_eq!(insights.average_completion_days, 0);
    }

    #[test]
    fn due_labels() {
        let now = at(10, 12);
        assert_eq!(due_label(at(10, 12), now), "today");
        assert_eq!(due_label(at(11, 0), now), "tomorrow");
        assert_eq!(due_label(at(14, 12), now), "in 4 days");
        assert_eq!(due_label(at(9, 12), now), "yesterday");
        assert_eq!(due_label(at(6, 12), now), "4 days overdue");
    }
}
