use super::types::DayPlan;
use crate::AppError;
use crate::api::client::FlexiplanClient;
use crate::api::models::{
    ActionResponse, Activity, ActivityKind, MarkCompletedResponse, RoutineData,
};
use crate::core::week::WeekCursor;
use crate::error::CliError;

/// Day-level routine operations on top of the raw endpoints
pub struct RoutineService {
    client: FlexiplanClient,
}

impl RoutineService {
    pub fn new(client: FlexiplanClient) -> Self {
        Self { client }
    }

    async fn fetch_routine(&self) -> Result<RoutineData, AppError> {
        let response = self.client.fetch_user_routine().await?;
        Ok(response.routine_data.unwrap_or_default())
    }

    /// Activities for the day under the cursor
    pub async fn day_plan(&self, cursor: &WeekCursor) -> Result<DayPlan, AppError> {
        let routine = self.fetch_routine().await?;
        Ok(plan_for(&routine, cursor))
    }

    async fn find_activity(&self, day: &str, name: &str) -> Result<Activity, AppError> {
        let routine = self.fetch_routine().await?;
        find_in(&routine, day, name).cloned().ok_or_else(|| {
            CliError::InvalidArguments(format!("No activity named '{}' on {}", name, day)).into()
        })
    }

    /// Flip the completion flag of the named activity
    pub async fn toggle_completion(
        &self,
        cursor: &WeekCursor,
        name: &str,
    ) -> Result<MarkCompletedResponse, AppError> {
        let day = cursor.day_name();
        let activity = self.find_activity(day, name).await?;
        let kind = ActivityKind::for_routine_type(&activity.activity_type);

        log::debug!(
            "Marking {} '{}' on {} as {}",
            kind.as_str(),
            activity.activity,
            day,
            !activity.completed()
        );
        Ok(self
            .client
            .mark_activity_completed(day, &activity.activity, kind, !activity.completed())
            .await?)
    }

    pub async fn remove(&self, cursor: &WeekCursor, name: &str) -> Result<ActionResponse, AppError> {
        let day = cursor.day_name();
        let activity = self.find_activity(day, name).await?;
        Ok(self
            .client
            .remove_activity_from_routine(day, &activity.activity, &activity.activity_type)
            .await?)
    }
}

/// Build the plan for the cursor's day from a fetched routine
pub fn plan_for(routine: &RoutineData, cursor: &WeekCursor) -> DayPlan {
    let day = cursor.day_name();
    DayPlan {
        day,
        heading: cursor.heading(),
        date_label: cursor.date_label(),
        activities: routine.get(day).cloned().unwrap_or_default(),
    }
}

fn find_in<'a>(routine: &'a RoutineData, day: &str, name: &str) -> Option<&'a Activity> {
    routine
        .get(day)?
        .iter()
        .find(|a| a.activity.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn activity(kind: &str, name: &str, done: Option<bool>) -> Activity {
        Activity {
            activity_type: kind.to_string(),
            activity: name.to_string(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            is_completed: done,
            day: None,
        }
    }

    fn routine() -> RoutineData {
        let mut routine = RoutineData::new();
        routine.insert(
            "Wednesday".to_string(),
            vec![
                activity("work", "Office", Some(true)),
                activity("task", "Laundry", None),
            ],
        );
        routine
    }

    #[test]
    fn test_plan_for_today() {
        let cursor = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 16).unwrap());
        let plan = plan_for(&routine(), &cursor);

        assert_eq!(plan.day, "Wednesday");
        assert_eq!(plan.heading, "Today's To Do");
        assert_eq!(plan.activities.len(), 2);
        assert_eq!(plan.completed_count(), 1);
    }

    #[test]
    fn test_plan_for_day_without_entries() {
        let mut cursor = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 16).unwrap());
        cursor.select("Thursday");
        let plan = plan_for(&routine(), &cursor);

        assert_eq!(plan.heading, "Thursday's To Do");
        assert!(plan.activities.is_empty());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let routine = routine();
        assert!(find_in(&routine, "Wednesday", "laundry").is_some());
        assert!(find_in(&routine, "Wednesday", "Gym").is_none());
        assert!(find_in(&routine, "Friday", "Laundry").is_none());
    }
}
