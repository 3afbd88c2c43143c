//! Prompt templates. Every template ends with an explicit output language.

use omni_core::User;

pub fn srs(feature: &str, language: &str) -> String {
    format!(
        r#"Act as a senior business analyst. Draft a SOFTWARE REQUIREMENTS SPECIFICATION (SRS) for the feature "{feature}".

SYSTEM CONSTRAINTS:
- Two strictly separated roles: ADMINISTRATOR (configuration) and USER (operation).
- Administrator: system configuration, quota management, folder permissions, security monitoring.
- User: works with granted resources only; upload, download and preview follow the permissions set by the administrator.

DOCUMENT SECTIONS:
1. OVERVIEW: goals of the {feature} module.
2. DETAILED PERMISSIONS: administrator versus user capabilities.
3. CORE FEATURES: business flows for upload, download, preview and mapping.
4. NON-FUNCTIONAL REQUIREMENTS: data security, response time.
5. DOCUMENT APPROVAL.

Write in {language}. Professional and concise, formatted as clean Markdown."#
    )
}

pub fn brd(feature: &str, language: &str) -> String {
    format!(
        r#"Act as a solution consultant. Draft a BUSINESS REQUIREMENTS DOCUMENT (BRD) for the feature "{feature}".

CONTENT:
- Emphasize the BUSINESS VALUE of the two-role administrator/user model for data management.
- Main sections:
  I. PROJECT CONTEXT: why centralized file management is needed.
  II. STRATEGIC GOALS: protecting digital assets, optimizing infrastructure cost.
  III. AUDIENCE ANALYSIS: why the administrator/user structure fits the enterprise.
  IV. SUCCESS METRICS (KPI): productivity, data leakage rate (0%).
  V. ROLLOUT PLAN.
  VI. SIGN-OFF.

Write in {language}. Formal tone aimed at executive leadership, formatted as Markdown."#
    )
}

pub fn user_security(user: &User, language: &str) -> String {
    let record = serde_json::to_string(user).unwrap_or_else(|_| user.username.clone());
    format!(
        "Analyze the account security of this user: {record}. Answer in {language}, under 60 words, naming exactly one risk and one recommended action."
    )
}

pub fn role_suggestion(department: &str, description: &str, language: &str) -> String {
    format!(
        r#"Based on the department "{department}" and the job description "{description}", recommend a system role: ADMINISTRATOR or STANDARD USER. Give the reason in one short sentence in {language}."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_prompts_carry_feature_and_language() {
        let prompt = srs("File Management", "Vietnamese");
        assert!(prompt.contains("\"File Management\""));
        assert!(prompt.trim_end().ends_with("formatted as clean Markdown."));
        assert!(prompt.contains("Write in Vietnamese"));

        let prompt = brd("Quota", "English");
        assert!(prompt.contains("\"Quota\""));
        assert!(prompt.contains("Write in English"));
    }

    #[test]
    fn test_security_prompt_embeds_user_record() {
        let users = omni_core::seed::users().unwrap();
        let prompt = user_security(&users[0], "English");
        assert!(prompt.contains(&users[0].username));
        assert!(prompt.contains(&users[0].email));
        assert!(prompt.contains("under 60 words"));
    }

    #[test]
    fn test_role_prompt() {
        let prompt = role_suggestion("Finance", "Approves invoices", "English");
        assert!(prompt.contains("\"Finance\""));
        assert!(prompt.contains("\"Approves invoices\""));
    }
}
