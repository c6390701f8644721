//! Figures shown by the analytics view.
//!
//! Nothing is tracked yet; every store starts from the same sample data.

use serde::{Deserialize, Serialize};

/// Views and clicks for one day of the chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStats {
    pub date: String,
    pub views: u64,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkClicks {
    pub id: String,
    pub title: String,
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    pub total_views: u64,
    pub total_clicks: u64,
    /// Click-through rate, preformatted (`"6.8%"`)
    pub ctr: String,
    pub history: Vec<DailyStats>,
    pub top_links: Vec<LinkClicks>,
}

impl AnalyticsStats {
    pub fn new(
        total_views: u64,
        total_clicks: u64,
        history: Vec<DailyStats>,
        top_links: Vec<LinkClicks>,
    ) -> Self {
        Self {
            total_views,
            total_clicks,
            ctr: format_ctr(total_clicks, total_views),
            history,
            top_links,
        }
    }

    /// A week of made-up traffic
    pub fn sample() -> Self {
        let week = [
            ("Mon", 120, 10),
            ("Tue", 240, 45),
            ("Wed", 180, 30),
            ("Thu", 320, 65),
            ("Fri", 450, 90),
            ("Sat", 520, 110),
            ("Sun", 600, 130),
        ];
        let links = [
            ("1", "My Portfolio", 340),
            ("2", "YouTube Channel", 120),
            ("3", "Book a Call", 85),
        ];

        Self::new(
            12_450,
            850,
            week.iter()
                .map(|&(date, views, clicks)| DailyStats {
                    date: date.to_string(),
                    views,
                    clicks,
                })
                .collect(),
            links
                .iter()
                .map(|&(id, title, clicks)| LinkClicks {
                    id: id.to_string(),
                    title: title.to_string(),
                    clicks,
                })
                .collect(),
        )
    }
}

impl Default for AnalyticsStats {
    fn default() -> Self {
        Self::sample()
    }
}

/// Percentage with one decimal; `"0.0%"` when there were no views
pub fn format_ctr(clicks: u64, views: u64) -> String {
    if views == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", clicks as f64 * 100.0 / views as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stats() {
        let stats = AnalyticsStats::sample();
        assert_eq!(stats.total_views, 12_450);
        assert_eq!(stats.total_clicks, 850);
        assert_eq!(stats.ctr, "6.8%");
        assert_eq!(stats.history.len(), 7);
        assert_eq!(stats.top_links[0].title, "My Portfolio");
    }

    #[test]
    fn test_format_ctr() {
        assert_eq!(format_ctr(0, 0), "0.0%");
        assert_eq!(format_ctr(1, 4), "25.0%");
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(AnalyticsStats::sample()).unwrap();
        assert_eq!(json["totalViews"], 12_450);
        assert_eq!(json["topLinks"][1]["clicks"], 120);
        assert_eq!(json["history"][0]["date"], "Mon");
    }
}
