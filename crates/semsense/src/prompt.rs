//! Semester plan request payload and the fixed advisor prompt.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_STUDENT_NAME: &str = "Student";

const UNSPECIFIED: &str = "unspecified";

/// Form data submitted by the SemSense panel.
///
/// Semester number and weekly hours are kept as raw JSON so the response can
/// echo them back exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterPlanRequest {
    #[serde(default)]
    pub semester_number: Value,
    #[serde(default)]
    pub subjects: Option<Vec<Subject>>,
    #[serde(default)]
    pub weekly_available_hours: Value,
    #[serde(default)]
    pub student_interests: Option<Vec<String>>,
    #[serde(default)]
    pub academic_calendar: Value,
    /// `None` when the field is absent. An explicit `null` is kept.
    #[serde(default, deserialize_with = "present")]
    pub student_name: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub credits: Value,
    #[serde(default)]
    pub difficulty: Value,
}

impl SemesterPlanRequest {
    /// Semester number, subject list and weekly hours must all be given.
    ///
    /// Zero, empty strings, `false` and `null` count as missing for the two
    /// scalar fields. An empty subject list counts as given.
    pub fn has_required_fields(&self) -> bool {
        is_filled(&self.semester_number)
            && self.subjects.is_some()
            && is_filled(&self.weekly_available_hours)
    }

    /// The name as sent, or the default when the field was left out.
    pub fn student_name(&self) -> Value {
        self.student_name
            .clone()
            .unwrap_or_else(|| Value::String(DEFAULT_STUDENT_NAME.to_string()))
    }

    pub fn subjects(&self) -> &[Subject] {
        self.subjects.as_deref().unwrap_or_default()
    }

    /// Render the advisor prompt. Output depends only on the request.
    pub fn render_prompt(&self) -> String {
        let subjects_list = self
            .subjects()
            .iter()
            .map(|subject| {
                format!(
                    "- {} ({} credits, Difficulty: {})",
                    subject.name,
                    display_value(&subject.credits),
                    display_value(&subject.difficulty)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let interests_list = match &self.student_interests {
            Some(interests) => format!("Student interests: {}", interests.join(", ")),
            None => "Student interests: Not provided".to_string(),
        };

        let calendar_info = if is_filled(&self.academic_calendar) {
            format!("KTU Academic Calendar: {}", self.academic_calendar)
        } else {
            "No calendar provided".to_string()
        };

        format!(
            r#"
You are an expert academic advisor helping a student plan their semester intelligently.

STUDENT PROFILE:
- Name: {name}
- Semester: {semester}
- Weekly Available Study Hours: {hours} hours
- {interests_list}

SUBJECTS THIS SEMESTER:
{subjects_list}

{calendar_info}

TASK:
Analyze this semester data and provide:

1. WORKLOAD ANALYSIS:
   - Overall difficulty level (Low/Medium/High)
   - Identifying high-risk periods (exam clusters, heavy weeks)
   - Realistic time allocation per subject per week

2. WEEKLY ACADEMIC PLAN:
   - Create a 16-week semester plan with:
     - Recommended study hours per subject per week
     - Key revision milestones
     - Built-in buffer weeks for exams

3. PROJECT & UPSKILLING SUGGESTIONS:
   - Suggest 2-3 project ideas aligned with current subjects and industry trends
   - Recommend 1-2 key skills to focus on this semester
   - Clearly mark which are "Must-do" vs "Optional if time permits"

4. EMERGING TRENDS PANEL:
   - Show 2-3 engineering trends relevant to the student's branch
   - Explain why each matters in simple language

5. REST & RECOVERY:
   - Identify light weeks suitable for projects
   - Suggest optimal times for upskilling
   - Highlight risk of burnout and how to avoid it

IMPORTANT:
- Be supportive and realistic, not overwhelming
- Prioritize clarity over quantity
- Keep all suggestions semester-bound
- Format response in clear sections with bullet points
- Provide actionable, specific guidance

START RESPONSE NOW:
"#,
            name = display_name(&self.student_name()),
            semester = display_value(&self.semester_number),
            hours = display_value(&self.weekly_available_hours),
        )
    }
}

fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings render bare, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => UNSPECIFIED.to_string(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn display_name(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> SemesterPlanRequest {
        serde_json::from_value(value).expect("valid request")
    }

    #[test]
    fn required_fields_follow_presence_rules() {
        let base = json!({
            "semesterNumber": 5,
            "subjects": [],
            "weeklyAvailableHours": 20
        });
        assert!(request(base.clone()).has_required_fields());

        let mut zero_semester = base.clone();
        zero_semester["semesterNumber"] = json!(0);
        assert!(!request(zero_semester).has_required_fields());

        let mut zero_hours = base.clone();
        zero_hours["weeklyAvailableHours"] = json!(0.0);
        assert!(!request(zero_hours).has_required_fields());

        let mut no_subjects = base.clone();
        no_subjects.as_object_mut().unwrap().remove("subjects");
        assert!(!request(no_subjects).has_required_fields());

        let mut null_subjects = base;
        null_subjects["subjects"] = Value::Null;
        assert!(!request(null_subjects).has_required_fields());

        assert!(!request(json!({})).has_required_fields());
    }

    #[test]
    fn prompt_renders_subjects_and_defaults() {
        let prompt = request(json!({
            "semesterNumber": 3,
            "weeklyAvailableHours": 18,
            "subjects": [
                { "name": "Data Structures", "credits": 4, "difficulty": "Hard" },
                { "name": "Discrete Maths", "credits": 3, "difficulty": "Medium" }
            ]
        }))
        .render_prompt();

        assert!(prompt.starts_with("\nYou are an expert academic advisor"));
        assert!(prompt.ends_with("START RESPONSE NOW:\n"));
        assert!(prompt.contains("- Name: Student\n"));
        assert!(prompt.contains("- Semester: 3\n"));
        assert!(prompt.contains("- Weekly Available Study Hours: 18 hours\n"));
        assert!(prompt.contains("- Student interests: Not provided\n"));
        assert!(prompt.contains(
            "SUBJECTS THIS SEMESTER:\n- Data Structures (4 credits, Difficulty: Hard)\n- Discrete Maths (3 credits, Difficulty: Medium)\n\nNo calendar provided\n"
        ));
    }

    #[test]
    fn prompt_includes_interests_and_calendar_in_order() {
        let prompt = request(json!({
            "semesterNumber": "S4",
            "weeklyAvailableHours": 12.5,
            "studentName": "Anu",
            "studentInterests": ["Robotics", "Web"],
            "academicCalendar": { "seriesExam": "2025-03-10", "endSem": "2025-05-02" },
            "subjects": [{ "name": "Signals", "credits": 4, "difficulty": "High" }]
        }))
        .render_prompt();

        assert!(prompt.contains("- Name: Anu\n"));
        assert!(prompt.contains("- Semester: S4\n"));
        assert!(prompt.contains("- Weekly Available Study Hours: 12.5 hours\n"));
        assert!(prompt.contains("- Student interests: Robotics, Web\n"));
        assert!(prompt.contains(
            r#"KTU Academic Calendar: {"seriesExam":"2025-03-10","endSem":"2025-05-02"}"#
        ));
    }

    #[test]
    fn rendering_is_deterministic() {
        let body = json!({
            "semesterNumber": 1,
            "weeklyAvailableHours": 10,
            "subjects": [{ "name": "Physics", "credits": 3, "difficulty": "Easy" }]
        });
        assert_eq!(request(body.clone()).render_prompt(), request(body).render_prompt());
    }

    #[test]
    fn missing_subject_details_render_as_unspecified() {
        let prompt = request(json!({
            "semesterNumber": 2,
            "weeklyAvailableHours": 8,
            "subjects": [{ "name": "Chemistry" }]
        }))
        .render_prompt();
        assert!(prompt.contains("- Chemistry (unspecified credits, Difficulty: unspecified)"));
    }

    #[test]
    fn student_name_default_applies_only_when_absent() {
        let base = json!({ "semesterNumber": 1, "weeklyAvailableHours": 10, "subjects": [] });
        assert_eq!(request(base.clone()).student_name(), json!("Student"));

        let mut null_name = base;
        null_name["studentName"] = Value::Null;
        let with_null = request(null_name);
        assert_eq!(with_null.student_name(), Value::Null);
        assert!(with_null.render_prompt().contains("- Name: null\n"));
    }
}
