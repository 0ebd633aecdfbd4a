//! Weather-based candidate filtering.
//!
//! Maps a reported weather condition to indoor or outdoor activities and
//! narrows a candidate list accordingly, before it reaches the recommender.

use serde::{Deserialize, Serialize};
use vote_store::Activity;

const OUTDOOR_CONDITIONS: &[&str] = &["clear", "sunny", "partly cloudy", "fair"];
const INDOOR_CONDITIONS: &[&str] = &[
    "rain",
    "snow",
    "thunderstorm",
    "drizzle",
    "cloudy",
    "overcast",
    "fog",
    "mist",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherPreference {
    Indoor,
    Outdoor,
    /// No filtering
    All,
}

impl WeatherPreference {
    /// Preference for a weather condition such as `"Partly Cloudy"`.
    /// Unknown conditions fall back to indoor.
    pub fn for_condition(condition: &str) -> Self {
        let condition = condition.trim().to_lowercase();
        if OUTDOOR_CONDITIONS.contains(&condition.as_str()) {
            WeatherPreference::Outdoor
        } else {
            WeatherPreference::Indoor
        }
    }

    /// Whether the condition is in either known list.
    pub fn is_known_condition(condition: &str) -> bool {
        let condition = condition.trim().to_lowercase();
        OUTDOOR_CONDITIONS.contains(&condition.as_str())
            || INDOOR_CONDITIONS.contains(&condition.as_str())
    }

    pub fn accepts(&self, activity: &Activity) -> bool {
        match self {
            WeatherPreference::Indoor => activity.is_indoor,
            WeatherPreference::Outdoor => !activity.is_indoor,
            WeatherPreference::All => true,
        }
    }

    /// Activities matching this preference, in their original order.
    pub fn filter_candidates(&self, activities: &[Activity]) -> Vec<Activity> {
        activities
            .iter()
            .filter(|activity| self.accepts(activity))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_store::ActivityType;

    fn activity(id: u32, is_indoor: bool) -> Activity {
        Activity {
            id,
            name: format!("Activity {}", id),
            activity_type: ActivityType::Other,
            location: "Lyon".to_string(),
            is_indoor,
            date: "2024-03-15".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_condition_mapping() {
        assert_eq!(WeatherPreference::for_condition("Sunny"), WeatherPreference::Outdoor);
        assert_eq!(
            WeatherPreference::for_condition("partly cloudy"),
            WeatherPreference::Outdoor
        );
        assert_eq!(WeatherPreference::for_condition("Drizzle"), WeatherPreference::Indoor);
        assert_eq!(WeatherPreference::for_condition("cloudy"), WeatherPreference::Indoor);
        assert_eq!(WeatherPreference::for_condition("sandstorm"), WeatherPreference::Indoor);
        assert!(WeatherPreference::is_known_condition(" Fog "));
        assert!(!WeatherPreference::is_known_condition("sandstorm"));
    }

    #[test]
    fn test_filter_candidates() {
        let activities = vec![activity(1, true), activity(2, false), activity(3, true)];

        let indoor = WeatherPreference::Indoor.filter_candidates(&activities);
        assert_eq!(indoor.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);

        let outdoor = WeatherPreference::for_condition("clear").filter_candidates(&activities);
        assert_eq!(outdoor.len(), 1);
        assert_eq!(outdoor[0].id, 2);

        assert_eq!(WeatherPreference::All.filter_candidates(&activities).len(), 3);
    }
}
