//! Prompt templates for analysis, persona synthesis and persona chat.

use teachclone_core::{ChatTemplate, TeacherProfile};

/// Prompt asking for a structured HTML breakdown of a transcript's teaching style.
pub fn analysis_prompt(transcript: &str) -> String {
    format!(
        r#"Analyze this teaching transcript and provide a concise analysis. Format the response in HTML with proper tags:

<h2>Teaching Style</h2>
<ul>
  <li>Primary method: [brief description]</li>
  <li>Use of examples: [brief description]</li>
  <li>Engagement level: [brief description]</li>
  <li>Clarity rating: [1-10]</li>
</ul>

<h2>Communication</h2>
<ul>
  <li>Pace and tone: [brief description]</li>
  <li>Clarity of speech: [brief description]</li>
  <li>Key strengths: [brief description]</li>
  <li>Areas for improvement: [brief description]</li>
</ul>

<h2>Content Delivery</h2>
<ul>
  <li>Information density: [brief description]</li>
  <li>Logical flow: [brief description]</li>
  <li>Use of visuals/examples: [brief description]</li>
  <li>Target audience: [brief description]</li>
</ul>

<h2>Learning Impact</h2>
<ul>
  <li>Overall effectiveness: [1-10]</li>
  <li>Key strengths: [brief description]</li>
  <li>Main weaknesses: [brief description]</li>
  <li>Improvement suggestions: [brief description]</li>
</ul>

Include specific timestamps for key moments in [MM:SS] format.

Transcript:
{transcript}"#
    )
}

/// Prompt asking for a single JSON persona object with the seven profile fields.
pub fn persona_prompt(analysis: &str) -> String {
    format!(
        r#"Based on this teaching analysis, create a personalized AI tutor that closely matches the teaching style and characteristics of the analyzed teacher. The tutor should adopt the same tone, pace, and teaching methods. Return the response as a JSON object:

{analysis}

Generate a tutor profile with these exact fields:
{{
  "name": "string (creative name that reflects the teaching style)",
  "style": "string (detailed description of teaching style, matching the analyzed teacher)",
  "tone": "string (communication tone matching the analyzed teacher)",
  "strengths": ["string (3-4 key strengths from the analysis)"],
  "specializations": ["string (2-3 subject areas based on the content)"],
  "useAnalogies": boolean (based on whether the teacher uses analogies),
  "stepByStep": boolean (based on whether the teacher uses step-by-step explanations)
}}

Make sure the response is valid JSON and the teaching style closely matches the analyzed teacher's approach."#
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Bullet list of the persona's characteristics.
///
/// The strengths line is left out entirely when the profile has none.
pub fn persona_characteristics(profile: &TeacherProfile) -> String {
    let mut lines = vec![
        format!("- Teaching Style: {}", profile.style),
        format!("- Communication Tone: {}", profile.tone),
    ];
    if !profile.strengths.is_empty() {
        lines.push(format!("- Key Strengths: {}", profile.strengths.join(", ")));
    }
    lines.push(format!("- Use of Analogies: {}", yes_no(profile.use_analogies)));
    lines.push(format!("- Step-by-Step Approach: {}", yes_no(profile.step_by_step)));
    lines.join("\n")
}

/// Render the role-play prompt for one chat turn.
///
/// Only the current message is embedded; earlier turns are never included.
pub fn render_chat_prompt(template: ChatTemplate, profile: &TeacherProfile, message: &str) -> String {
    let name = &profile.name;
    let characteristics = persona_characteristics(profile);

    match template {
        ChatTemplate::Elaborate => format!(
            r#"You are {name}, a dedicated teacher who maintains a consistent teaching style.

Key characteristics:
{characteristics}

Important guidelines:
1. Initial greetings should be simple and respectful (e.g., "Hello", "Hi there", "Good day")
2. For explanations:
   - Use detailed, elaborate responses
   - Maintain the exact teaching style from the transcript
   - Use the same repetitive phrases and patterns
   - Break down complex concepts thoroughly
   - Include relevant examples and analogies if that's your style
3. Keep the mentor's unique way of:
   - Explaining concepts
   - Using specific phrases
   - Breaking down information
   - Engaging with students
4. Maintain consistency in:
   - Teaching methodology
   - Communication patterns
   - Explanation style
   - Use of examples

Student's message: {message}

Remember: While keeping initial greetings simple, provide detailed, thorough explanations that match the mentor's exact teaching style and patterns."#
        ),
        ChatTemplate::Supportive => format!(
            r#"You are {name}, a friendly and supportive teacher.

Key characteristics:
{characteristics}

Guidelines:
1. Greetings get a short, warm reply (e.g., "Hi there!", "Good to see you")
2. Keep every answer to three or four sentences unless the student asks for more detail
3. Encourage the student and acknowledge their effort
4. Stay in your teaching style and tone
5. Do not use markdown formatting

Student's message: {message}

Respond briefly and supportively, as {name} would."#
        ),
        ChatTemplate::DualMode => format!(
            r#"You are {name}, a teacher who adapts to what the student needs.

Key characteristics:
{characteristics}

First decide whether the student's message is casual conversation (a greeting, small talk, thanks) or a technical or learning question.
- Casual: answer in one or two natural sentences. Do not start a lesson.
- Technical: explain in your teaching style and tone. Follow the step-by-step approach and use analogies only if your characteristics say so. Finish with a short check for understanding.
Never say which kind of message you decided it was.

Student's message: {message}"#
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> TeacherProfile {
        TeacherProfile {
            name: "Coach Carter".into(),
            style: "Repetition with drills".into(),
            tone: "Firm but kind".into(),
            strengths: vec!["Discipline".into(), "Clear structure".into()],
            specializations: vec!["Algebra".into()],
            use_analogies: true,
            step_by_step: false,
        }
    }

    #[test]
    fn test_analysis_prompt_embeds_transcript() {
        let prompt = analysis_prompt("line one\nline two");
        assert!(prompt.ends_with("Transcript:\nline one\nline two"));
        for heading in ["Teaching Style", "Communication", "Content Delivery", "Learning Impact"] {
            assert!(prompt.contains(&format!("<h2>{}</h2>", heading)));
        }
        assert!(prompt.contains("[MM:SS]"));
    }

    #[test]
    fn test_persona_prompt_lists_fields() {
        let prompt = persona_prompt("<h2>Teaching Style</h2>");
        assert!(prompt.contains("<h2>Teaching Style</h2>"));
        assert!(prompt.contains("\"useAnalogies\": boolean"));
        assert!(prompt.contains("\"stepByStep\": boolean"));
    }

    #[test]
    fn test_elaborate_substitutes_profile() {
        let prompt = render_chat_prompt(ChatTemplate::Elaborate, &profile(), "What is a limit?");
        assert!(prompt.starts_with("You are Coach Carter, a dedicated teacher"));
        assert!(prompt.contains("- Teaching Style: Repetition with drills"));
        assert!(prompt.contains("- Communication Tone: Firm but kind"));
        assert!(prompt.contains("- Key Strengths: Discipline, Clear structure"));
        assert!(prompt.contains("- Use of Analogies: Yes"));
        assert!(prompt.contains("- Step-by-Step Approach: No"));
        assert!(prompt.contains("Student's message: What is a limit?"));
    }

    #[test]
    fn test_every_template_embeds_message_and_name() {
        for template in [ChatTemplate::Elaborate, ChatTemplate::Supportive, ChatTemplate::DualMode] {
            let prompt = render_chat_prompt(template, &profile(), "Hi!");
            assert!(prompt.contains("Coach Carter"), "{:?}", template);
            assert!(prompt.contains("Student's message: Hi!"), "{:?}", template);
        }
    }

    #[test]
    fn test_missing_strengths_omits_line() {
        let mut p = profile();
        p.strengths.clear();
        let prompt = render_chat_prompt(ChatTemplate::Elaborate, &p, "Hello");
        assert!(!prompt.contains("Key Strengths"));
        assert!(prompt.contains("- Communication Tone: Firm but kind\n- Use of Analogies: Yes"));
    }
}
