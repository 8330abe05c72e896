use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{flag_setters, WebhookService};

/// A workflow job template payload.
///
/// The workflow schema is a slimmer cousin of [`JobTemplate`]: only `name`
/// is required, the organization/inventory references are optional, and
/// there are no numeric bounds to check, so [`build`] is infallible.
///
/// [`JobTemplate`]: crate::models::JobTemplate
/// [`build`]: WorkflowJobTemplateBuilder::build
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowJobTemplate {
    name: String,
    description: String,
    #[serde(serialize_with = "super::vars_as_json_text")]
    extra_vars: Map<String, Value>,
    organization: Option<String>,
    survey_enabled: bool,
    allow_simultaneous: bool,
    ask_variables_on_launch: bool,
    inventory: Option<String>,
    limit: String,
    scm_branch: String,
    ask_inventory_on_launch: bool,
    ask_scm_branch_on_launch: bool,
    ask_limit_on_launch: bool,
    webhook_service: Option<WebhookService>,
    webhook_credential: Option<String>,
    ask_labels_on_launch: bool,
    ask_skip_tags_on_launch: bool,
    ask_tags_on_launch: bool,
    skip_tags: String,
    #[serde(serialize_with = "super::tags_as_comma_list")]
    job_tags: BTreeSet<String>,
}

impl WorkflowJobTemplate {
    /// Start building a workflow job template.
    pub fn builder(name: impl Into<String>) -> WorkflowJobTemplateBuilder {
        WorkflowJobTemplateBuilder::new(name)
    }
}

/// Builder for [`WorkflowJobTemplate`].
#[derive(Debug, Clone)]
pub struct WorkflowJobTemplateBuilder {
    template: WorkflowJobTemplate,
}

impl WorkflowJobTemplateBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            template: WorkflowJobTemplate {
                name: name.into(),
                description: String::new(),
                extra_vars: Map::new(),
                organization: None,
                survey_enabled: false,
                allow_simultaneous: false,
                ask_variables_on_launch: false,
                inventory: None,
                limit: String::new(),
                scm_branch: String::new(),
                ask_inventory_on_launch: false,
                ask_scm_branch_on_launch: false,
                ask_limit_on_launch: false,
                webhook_service: None,
                webhook_credential: None,
                ask_labels_on_launch: false,
                ask_skip_tags_on_launch: false,
                ask_tags_on_launch: false,
                skip_tags: String::new(),
                job_tags: BTreeSet::new(),
            },
        }
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.template.description = value.into();
        self
    }

    pub fn extra_vars(mut self, value: Map<String, Value>) -> Self {
        self.template.extra_vars = value;
        self
    }

    pub fn organization(mut self, value: impl Into<String>) -> Self {
        self.template.organization = Some(value.into());
        self
    }

    pub fn inventory(mut self, value: impl Into<String>) -> Self {
        self.template.inventory = Some(value.into());
        self
    }

    pub fn limit(mut self, value: impl Into<String>) -> Self {
        self.template.limit = value.into();
        self
    }

    pub fn scm_branch(mut self, value: impl Into<String>) -> Self {
        self.template.scm_branch = value.into();
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

    pub fn skip_tags(mut self, value: impl Into<String>) -> Self {
        self.template.skip_tags = value.into();
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

    flag_setters!(
        survey_enabled,
        allow_simultaneous,
        ask_variables_on_launch,
        ask_inventory_on_launch,
        ask_scm_branch_on_launch,
        ask_limit_on_launch,
        ask_labels_on_launch,
        ask_skip_tags_on_launch,
        ask_tags_on_launch,
    );

    pub fn build(self) -> WorkflowJobTemplate {
        self.template
    }
}
