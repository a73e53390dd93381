use crate::api::models::{
    AgentMessage, DirectMessage, Friend, FriendRequest, Hobby, RoutineAnalytics, RoutineData,
    Task, User,
};
use crate::core::services::types::DayPlan;
use crate::core::week::DAYS;
use crate::utils::text::{format_timestamp, truncate_text};
use comfy_table::{Attribute, Cell, Color, Table, presets};
use crossterm::terminal;
use serde_json::Value;

struct ColumnWidths {
    name: usize,
    text: usize,
}

pub struct TableDisplay {
    max_width: Option<usize>,
    use_colors: bool,
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: Self::detect_terminal_width(),
            use_colors: true,
        }
    }

    fn detect_terminal_width() -> Option<usize> {
        match terminal::size() {
            Ok((cols, _)) => Some((cols as usize).clamp(40, 200)),
            Err(_) => Some(80),
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn new_table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(comfy_table::ContentArrangement::Dynamic);
        self.configure_table_width(&mut table);
        let cells: Vec<Cell> = headers
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(cells);
        table
    }

    fn configure_table_width(&self, table: &mut Table) {
        let width = self
            .max_width
            .map(|w| if w > 20 { w - 6 } else { w.max(40) })
            .unwrap_or(80);
        table.set_width(width as u16);
    }

    fn get_responsive_column_widths(&self) -> ColumnWidths {
        match self.max_width.unwrap_or(80) {
            0..=59 => ColumnWidths { name: 12, text: 18 },
            60..=79 => ColumnWidths { name: 16, text: 26 },
            80..=119 => ColumnWidths { name: 24, text: 40 },
            _ => ColumnWidths { name: 36, text: 70 },
        }
    }

    fn id_cell(&self, id: i64) -> Cell {
        self.colored_cell(&id.to_string(), Color::Cyan)
    }

    fn check_cell(&self, done: bool) -> Cell {
        if done {
            self.colored_cell("✓", Color::Green)
        } else {
            self.colored_cell("·", Color::DarkGrey)
        }
    }

    pub fn render_hobbies(&self, hobbies: &[Hobby]) -> String {
        if hobbies.is_empty() {
            return "No hobbies found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Name", "Category"]);
        for hobby in hobbies {
            table.add_row(vec![
                self.id_cell(hobby.id),
                Cell::new(truncate_text(&hobby.name, widths.name)),
                self.colored_cell(&hobby.category, Color::DarkGrey),
            ]);
        }
        table.to_string()
    }

    pub fn render_tasks(&self, tasks: &[Task]) -> String {
        if tasks.is_empty() {
            return "No tasks yet.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Task", "Priority", "Duration", "Days", "Fixed"]);
        for task in tasks {
            let fixed = match (&task.fixed_time_slot, task.is_fixed_time) {
                (Some(slot), true) => slot.clone(),
                _ => "-".to_string(),
            };
            table.add_row(vec![
                self.id_cell(task.id),
                Cell::new(truncate_text(&task.task_name, widths.name)),
                Cell::new(&task.priority),
                Cell::new(task.time_required.as_deref().unwrap_or("-")),
                Cell::new(truncate_text(&task.days_associated.join(", "), widths.text)),
                Cell::new(fixed),
            ]);
        }
        table.to_string()
    }

    pub fn render_users(&self, users: &[User]) -> String {
        if users.is_empty() {
            return "No users found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Username", "Name", "Email"]);
        for user in users {
            table.add_row(vec![
                self.id_cell(user.id),
                Cell::new(truncate_text(&user.username, widths.name)),
                Cell::new(truncate_text(&user.full_name(), widths.name)),
                self.colored_cell(user.email.as_deref().unwrap_or("-"), Color::DarkGrey),
            ]);
        }
        table.to_string()
    }

    pub fn render_friends(&self, friends: &[Friend]) -> String {
        if friends.is_empty() {
            return "No friends yet.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["ID", "Username", "Name"]);
        for friend in friends {
            let full_name = format!("{} {}", friend.first_name, friend.last_name);
            table.add_row(vec![
                self.id_cell(friend.id),
                Cell::new(truncate_text(&friend.name, widths.name)),
                Cell::new(truncate_text(full_name.trim(), widths.name)),
            ]);
        }
        table.to_string()
    }

    pub fn render_friend_requests(&self, requests: &[FriendRequest]) -> String {
        if requests.is_empty() {
            return "No pending friend requests.".to_string();
        }
        let mut table = self.new_table(&["Request", "From", "Name", "Status", "Sent"]);
        for request in requests {
            let full_name = format!("{} {}", request.first_name, request.last_name);
            table.add_row(vec![
                self.id_cell(request.id),
                Cell::new(&request.sender_username),
                Cell::new(full_name.trim()),
                Cell::new(format!("{:?}", request.status)),
                self.colored_cell(
                    &request
                        .created_at
                        .as_deref()
                        .map(format_timestamp)
                        .unwrap_or_else(|| "-".to_string()),
                    Color::DarkGrey,
                ),
            ]);
        }
        table.to_string()
    }

    /// Conversation transcript; messages sent by `me` are marked as such
    pub fn render_messages(&self, messages: &[DirectMessage], me: Option<i64>) -> String {
        if messages.is_empty() {
            return "No messages yet.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["Time", "From", "Message", "Read"]);
        for message in messages {
            let from = if Some(message.sender.id) == me {
                self.colored_cell("you", Color::Green)
            } else {
                Cell::new(&message.sender.username)
            };
            table.add_row(vec![
                self.colored_cell(&format_timestamp(&message.timestamp), Color::DarkGrey),
                from,
                Cell::new(truncate_text(&message.message, widths.text)),
                self.check_cell(message.is_read),
            ]);
        }
        table.to_string()
    }

    pub fn render_agent_messages(&self, messages: &[AgentMessage]) -> String {
        if messages.is_empty() {
            return "No conversation yet.".to_string();
        }
        let mut output = String::new();
        for message in messages {
            let speaker = if message.is_user { "You" } else { "Assistant" };
            let when = message
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default();
            output.push_str(&format!("{} {}\n{}\n\n", speaker, when, message.content));
        }
        output.trim_end().to_string()
    }

    pub fn render_day_plan(&self, plan: &DayPlan) -> String {
        let mut output = format!(
            "{}\n{} ({}/{} done)\n",
            plan.heading,
            plan.date_label,
            plan.completed_count(),
            plan.activities.len()
        );
        if plan.activities.is_empty() {
            output.push_str("Nothing planned.");
            return output;
        }

        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["", "Time", "Activity", "Type"]);
        for activity in &plan.activities {
            table.add_row(vec![
                self.check_cell(activity.completed()),
                Cell::new(activity.time_range()),
                Cell::new(truncate_text(&activity.activity, widths.text)),
                self.colored_cell(&activity.activity_type, Color::DarkGrey),
            ]);
        }
        output.push_str(&table.to_string());
        output
    }

    /// Whole-week view, days in Monday..Sunday order
    pub fn render_routine_week(&self, routine: &RoutineData) -> String {
        if routine.is_empty() {
            return "No routine found.".to_string();
        }
        let widths = self.get_responsive_column_widths();
        let mut table = self.new_table(&["Day", "Time", "Activity", "Type"]);
        let week_order = DAYS.iter().cycle().skip(1).take(7);
        for day in week_order {
            let Some(activities) = routine.get(*day) else {
                continue;
            };
            for (index, activity) in activities.iter().enumerate() {
                let day_label = if index == 0 { *day } else { "" };
                table.add_row(vec![
                    self.bold_header(day_label, Color::Yellow),
                    Cell::new(activity.time_range()),
                    Cell::new(truncate_text(&activity.activity, widths.text)),
                    self.colored_cell(&activity.activity_type, Color::DarkGrey),
                ]);
            }
        }
        table.to_string()
    }

    pub fn render_analytics(&self, analytics: &RoutineAnalytics) -> String {
        let mut table = self.new_table(&["Section", "Metric", "Value"]);
        for (section, value) in analytics.sections() {
            match value {
                Value::Object(map) if !map.is_empty() => {
                    for (index, (key, inner)) in map.iter().enumerate() {
                        let label = if index == 0 { section } else { "" };
                        table.add_row(vec![
                            self.bold_header(label, Color::Yellow),
                            Cell::new(key),
                            Cell::new(self.format_cell_value(inner)),
                        ]);
                    }
                }
                other => {
                    table.add_row(vec![
                        self.bold_header(section, Color::Yellow),
                        Cell::new(""),
                        Cell::new(self.format_cell_value(other)),
                    ]);
                }
            }
        }
        table.to_string()
    }

    pub fn format_cell_value(&self, value: &Value) -> String {
        match value {
            Value::Null => "-".to_string(),
            Value::String(s) if s.len() > 100 => truncate_text(s, 100),
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(arr) if arr.is_empty() => "[]".to_string(),
            Value::Array(arr) => format!("[{} items]", arr.len()),
            Value::Object(obj) if obj.is_empty() => "{}".to_string(),
            Value::Object(obj) => format!("{{{} items}}", obj.len()),
        }
    }
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}
