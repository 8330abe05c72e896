use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::models::{JobType, WebhookService};

/// A job template payload.
///
/// Mirrors the remote API's writable job-template attributes. `ask_*` flags
/// mark values the server prompts for at launch time instead of taking from
/// the template. Built via [`JobTemplate::builder`]; `name`, `inventory`,
/// `project` and `playbook` are required, everything else defaults to the
/// API's own defaults.
#[derive(Debug, Clone, Serialize)]
pub struct JobTemplate {
    name: String,
    description: String,
    job_type: JobType,
    inventory: String,
    project: String,
    playbook: String,
    scm_branch: String,
    forks: i32,
    limit: String,
    verbosity: u8,
    #[serde(serialize_with = "super::vars_as_json_text")]
    extra_vars: Map<String, Value>,
    #[serde(serialize_with = "super::tags_as_comma_list")]
    job_tags: BTreeSet<String>,
    force_handlers: bool,
    skip_tags: String,
    start_at_task: String,
    timeout: i32,
    use_fact_cache: bool,
    execution_environment: Option<String>,
    host_config_key: String,
    ask_scm_branch_on_launch: bool,
    ask_diff_mode_on_launch: bool,
    ask_variables_on_launch: bool,
    ask_limit_on_launch: bool,
    ask_tags_on_launch: bool,
    ask_skip_tags_on_launch: bool,
    ask_job_type_on_launch: bool,
    ask_verbosity_on_launch: bool,
    ask_inventory_on_launch: bool,
    ask_credential_on_launch: bool,
    ask_execution_environment_on_launch: bool,
    ask_labels_on_launch: bool,
    ask_forks_on_launch: bool,
    ask_job_slice_count_on_launch: bool,
    ask_timeout_on_launch: bool,
    ask_instance_groups_on_launch: bool,
    survey_enabled: bool,
    become_enabled: bool,
    diff_mode: bool,
    allow_simultaneous: bool,
    job_slice_count: u32,
    webhook_service: Option<WebhookService>,
    webhook_credential: Option<String>,
    prevent_instance_group_fallback: bool,
}

impl JobTemplate {
    /// Start building a job template from its required fields.
    ///
    /// `inventory`, `project` and (optionally, later) `webhook_credential`
    /// are given by name; the adapter resolves them to server ids on
    /// create/update.
    pub fn builder(
        name: impl Into<String>,
        inventory: impl Into<String>,
        project: impl Into<String>,
        playbook: impl Into<String>,
    ) -> JobTemplateBuilder {
        JobTemplateBuilder::new(name, inventory, project, playbook)
    }
}

/// Builder for [`JobTemplate`]; bound checks run once in [`build`].
///
/// [`build`]: JobTemplateBuilder::build
#[derive(Debug, Clone)]
pub struct JobTemplateBuilder {
    template: JobTemplate,
}

use crate::models::flag_setters;

impl JobTemplateBuilder {
    fn new(
        name: impl Into<String>,
        inventory: impl Into<String>,
        project: impl Into<String>,
        playbook: impl Into<String>,
    ) -> Self {
        Self {
            template: JobTemplate {
                name: name.into(),
                description: String::new(),
                job_type: JobType::default(),
                inventory: inventory.into(),
                project: project.into(),
                playbook: playbook.into(),
                scm_branch: String::new(),
                forks: 0,
                limit: String::new(),
                verbosity: 0,
                extra_vars: Map::new(),
                job_tags: BTreeSet::new(),
                force_handlers: false,
                skip_tags: String::new(),
                start_at_task: String::new(),
                timeout: 0,
                use_fact_cache: false,
                execution_environment: None,
                host_config_key: String::new(),
                ask_scm_branch_on_launch: false,
                ask_diff_mode_on_launch: false,
                ask_variables_on_launch: false,
                ask_limit_on_launch: false,
                ask_tags_on_launch: false,
                ask_skip_tags_on_launch: false,
                ask_job_type_on_launch: false,
                ask_verbosity_on_launch: false,
                ask_inventory_on_launch: false,
                ask_credential_on_launch: false,
                ask_execution_environment_on_launch: false,
                ask_labels_on_launch: false,
                ask_forks_on_launch: false,
                ask_job_slice_count_on_launch: false,
                ask_timeout_on_launch: false,
                ask_instance_groups_on_launch: false,
                survey_enabled: false,
                become_enabled: false,
                diff_mode: false,
                allow_simultaneous: false,
                job_slice_count: 1,
                webhook_service: None,
                webhook_credential: None,
                prevent_instance_group_fallback: false,
            },
        }
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.template.description = value.into();
        self
    }

    pub fn job_type(mut self, value: JobType) -> Self {
        self.template.job_type = value;
        self
    }

    pub fn scm_branch(mut self, value: impl Into<String>) -> Self {
        self.template.scm_branch = value.into();
        self
    }

    pub fn forks(mut self, value: i32) -> Self {
        self.template.forks = value;
        self
    }

    pub fn limit(mut self, value: impl Into<String>) -> Self {
        self.template.limit = value.into();
        self
    }

    pub fn verbosity(mut self, value: u8) -> Self {
        self.template.verbosity = value;
        self
    }

    pub fn extra_vars(mut self, value: Map<String, Value>) -> Self {
        self.template.extra_vars = value;
        self
    }

    pub fn job_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.template.job_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_tags(mut self, value: impl Into<String>) -> Self {
        self.template.skip_tags = value.into();
        self
    }

    pub fn start_at_task(mut self, value: impl Into<String>) -> Self {
        self.template.start_at_task = value.into();
        self
    }

    pub fn timeout(mut self, value: i32) -> Self {
        self.template.timeout = value;
        self
    }

    pub fn execution_environment(mut self, value: impl Into<String>) -> Self {
        self.template.execution_environment = Some(value.into());
        self
    }

    pub fn host_config_key(mut self, value: impl Into<String>) -> Self {
        self.template.host_config_key = value.into();
        self
    }

    pub fn job_slice_count(mut self, value: u32) -> Self {
        self.template.job_slice_count = value;
        self
    }

    pub fn webhook_service(mut self, value: WebhookService) -> Self {
        self.template.webhook_service = Some(value);
        self
    }

    pub fn webhook_credential(mut self, value: impl Into<String>) -> Self {
        self.template.webhook_credential = Some(value.into());
        self
    }

    flag_setters!(
        force_handlers,
        use_fact_cache,
        ask_scm_branch_on_launch,
        ask_diff_mode_on_launch,
        ask_variables_on_launch,
        ask_limit_on_launch,
        ask_tags_on_launch,
        ask_skip_tags_on_launch,
        ask_job_type_on_launch,
        ask_verbosity_on_launch,
        ask_inventory_on_launch,
        ask_credential_on_launch,
        ask_execution_environment_on_launch,
        ask_labels_on_launch,
        ask_forks_on_launch,
        ask_job_slice_count_on_launch,
        ask_timeout_on_launch,
        ask_instance_groups_on_launch,
        survey_enabled,
        become_enabled,
        diff_mode,
        allow_simultaneous,
        prevent_instance_group_fallback,
    );

    /// Check schema bounds and produce the template.
    ///
    /// Bounds: `verbosity` in 0..=5, `forks >= 0`, `timeout >= 0`,
    /// `job_slice_count >= 1`.
    pub fn build(self) -> Result<JobTemplate, ApiError> {
        let t = &self.template;
        if t.forks < 0 {
            return Err(ApiError::Validation {
                field: "forks",
                message: format!("must be >= 0, got {}", t.forks),
            });
        }
        if t.verbosity > 5 {
            return Err(ApiError::Validation {
                field: "verbosity",
                message: format!("must be between 0 and 5, got {}", t.verbosity),
            });
        }
        if t.timeout < 0 {
            return Err(ApiError::Validation {
                field: "timeout",
                message: format!("must be >= 0, got {}", t.timeout),
            });
        }
        if t.job_slice_count < 1 {
            return Err(ApiError::Validation {
                field: "job_slice_count",
                message: "must be >= 1, got 0".to_string(),
            });
        }
        Ok(self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> JobTemplateBuilder {
        JobTemplate::builder("Backup Job", "db_inventory", "backup_project", "backup.yml")
    }

    #[test]
    fn defaults_match_the_api_schema() {
        let payload = serde_json::to_value(builder().build().unwrap()).unwrap();
        assert_eq!(payload["name"], "Backup Job");
        assert_eq!(payload["description"], "");
        assert_eq!(payload["job_type"], "run");
        assert_eq!(payload["forks"], 0);
        assert_eq!(payload["verbosity"], 0);
        assert_eq!(payload["job_slice_count"], 1);
        assert_eq!(payload["webhook_service"], Value::Null);
        assert_eq!(payload["webhook_credential"], Value::Null);
        assert_eq!(payload["execution_environment"], Value::Null);
        assert_eq!(payload["ask_variables_on_launch"], false);
    }

    #[test]
    fn extra_vars_serialize_as_json_text() {
        let vars = match json!({"a": 1}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let template = builder().extra_vars(vars).build().unwrap();
        let payload = serde_json::to_value(&template).unwrap();
        let text = payload["extra_vars"].as_str().unwrap();
        let back: Value = serde_json::from_str(text).unwrap();
        assert_eq!(back, json!({"a": 1}));
    }

    #[test]
    fn job_tags_serialize_comma_joined() {
        let template = builder().job_tags(["y", "x"]).build().unwrap();
        let payload = serde_json::to_value(&template).unwrap();
        let text = payload["job_tags"].as_str().unwrap();
        let mut tags: Vec<&str> = text.split(',').collect();
        tags.sort_unstable();
        assert_eq!(tags, vec!["x", "y"]);
    }

    #[test]
    fn duplicate_job_tags_collapse() {
        let template = builder().job_tags(["x", "x"]).build().unwrap();
        let payload = serde_json::to_value(&template).unwrap();
        assert_eq!(payload["job_tags"], "x");
    }

    #[test]
    fn verbosity_upper_bound_is_five() {
        assert!(builder().verbosity(5).build().is_ok());
        let err = builder().verbosity(6).build().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation {
                field: "verbosity",
                ..
            }
        ));
    }

    #[test]
    fn negative_forks_fail_validation() {
        let err = builder().forks(-1).build().unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "forks", .. }));
    }

    #[test]
    fn negative_timeout_fails_validation() {
        let err = builder().timeout(-10).build().unwrap_err();
        assert!(matches!(err, ApiError::Validation { field: "timeout", .. }));
    }

    #[test]
    fn zero_job_slice_count_fails_validation() {
        let err = builder().job_slice_count(0).build().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation {
                field: "job_slice_count",
                ..
            }
        ));
    }

    #[test]
    fn webhook_configuration_round_trips_to_payload() {
        let template = builder()
            .webhook_service(WebhookService::Github)
            .webhook_credential("gh_credential")
            .build()
            .unwrap();
        let payload = serde_json::to_value(&template).unwrap();
        assert_eq!(payload["webhook_service"], "github");
        assert_eq!(payload["webhook_credential"], "gh_credential");
    }
}
