// src/models/report.rs

use serde::de::{Deserializer, IntoDeserializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- OPERADORES ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 8] = [
        FilterOperator::Equals,
        FilterOperator::Contains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::IsEmpty,
        FilterOperator::IsNotEmpty,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterOperator::Equals => "equals",
            FilterOperator::Contains => "contains",
            FilterOperator::StartsWith => "starts with",
            FilterOperator::EndsWith => "ends with",
            FilterOperator::GreaterThan => "greater than",
            FilterOperator::LessThan => "less than",
            FilterOperator::IsEmpty => "is empty",
            FilterOperator::IsNotEmpty => "is not empty",
        }
    }

    /// Operadores sem operando: o `value` é ignorado.
    pub fn takes_value(self) -> bool {
        !matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

// --- FILTRO (Uma cláusula "campo operador valor") ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    // Chave do registro (Ex: "joinDate"). Vazio = ainda não escolhido
    #[serde(default)]
    #[schema(example = "status")]
    pub field: String,
    // None = ainda não escolhido no formulário (o frontend manda "")
    #[serde(default, deserialize_with = "empty_as_none")]
    pub operator: Option<FilterOperator>,
    #[serde(default)]
    #[schema(example = "Active")]
    pub value: String,
}

impl Filter {
    pub fn blank() -> Self {
        Self {
            id: Uuid::new_v4(),
            field: String::new(),
            operator: None,
            value: String::new(),
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<FilterOperator>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => {
            let de: serde::de::value::StrDeserializer<'_, D::Error> = s.into_deserializer();
            FilterOperator::deserialize(de).map(Some)
        }
    }
}

// Qual formulário é dono da lista: muda o piso de remoção e a exigência de valor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FilterListKind {
    #[default]
    Generic,
    ReportBuilder,
}

// Uma edição pontual em um filtro (a tripla campo/operador/valor)
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Field(String),
    Operator(Option<FilterOperator>),
    Value(String),
}

// --- CATÁLOGO DE CAMPOS ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    #[schema(example = "joinDate")]
    pub key: String,
    #[schema(example = "Join Date")]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatorOption {
    pub key: FilterOperator,
    pub label: String,
    pub takes_value: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportCatalog {
    pub fields: Vec<FieldOption>,
    pub operators: Vec<OperatorOption>,
}

// --- PRÉ-VISUALIZAÇÃO ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreviewRequest {
    #[serde(default)]
    pub variant: FilterListKind,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    #[schema(example = json!(["firstName", "email"]))]
    pub output_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    // Apenas os filtros válidos, na ordem original
    pub filters: Vec<Filter>,
    pub output_fields: Vec<String>,
    #[schema(example = "Status equals \"Active\" AND Join Date is empty")]
    pub preview: String,
}
