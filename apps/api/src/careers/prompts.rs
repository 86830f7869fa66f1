// Career prompt templates.
// `{field}` tokens name request fields and are substituted verbatim by `UseCase::render`.
// Every other brace is literal JSON shown to the model.

pub const CAREER_ADVICE_TEMPLATE: &str = r#"You are an expert career counselor and interview coach.

For the job role: {role}, provide a response in JSON format with the following structure:

{
    "advice": "Brief career advice specific to the job role",
    "tips": ["Tip 1", "Tip 2", "Tip 3"],
    "questions": ["Mock Question 1", "Mock Question 2", "Mock Question 3"]
}
"#;

pub const RESUME_ANALYSIS_TEMPLATE: &str = r#"Analyze this resume and suggest suitable job roles based on the skills, experience, and qualifications provided. Provide a detailed response in JSON format.

Resume:
{resume}

Provide output in this exact JSON structure:
{
    "summary": "Brief summary of the resume",
    "suggestedRoles": ["List of 3-5 suggested job roles"],
    "strengths": ["List of 3-5 strengths"],
    "improvements": ["List of 3-5 areas for improvement"],
    "keywords": ["List of 8-12 relevant keywords to include"],
    "tips": ["List of 3-5 optimization tips for the resume"]
}

Be specific and actionable in your recommendations. Focus on identifying job roles that align with the resume's content.
"#;

pub const COVER_LETTER_TEMPLATE: &str = r#"Write a professional cover letter for a {role} position at {company} based on this resume:

Resume:
{resume}

The cover letter should:
- Be about 250-350 words
- Highlight relevant skills and experiences
- Show enthusiasm for the specific role and company
- Be professional but not overly formal
- Include a strong opening and closing

Return the cover letter in this JSON format:
{
    "coverLetter": "The generated cover letter text here"
}
"#;

pub const SKILLS_ANALYSIS_TEMPLATE: &str = r#"You are an expert career counselor. Analyze the following skills and interested job roles to suggest skills to improve, additional skills to learn, and provide career advice.

Skills: {skills}
Interested Job Roles: {interestedJobRoles}

Provide a response in JSON format with the following structure:
{
    "skillsToImprove": ["List of 3-5 skills to enhance for the job roles"],
    "additionalSkills": ["List of 3-5 new skills to learn for the job roles"],
    "careerAdvice": ["List of 3-5 pieces of career advice"]
}

Be specific and actionable in your recommendations. Focus on aligning the suggestions with the job roles provided.
"#;
