// src/services/report_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::report::{
        FieldOption, Filter, FilterListKind, FilterOperator, FilterUpdate, OperatorOption,
        ReportCatalog, ReportPreview, ReportPreviewRequest,
    },
};

// Campos de membro disponíveis nos relatórios: (chave, rótulo)
const MEMBER_FIELDS: &[(&str, &str)] = &[
    ("firstName", "First Name"),
    ("lastName", "Last Name"),
    ("email", "Email"),
    ("phone", "Phone"),
    ("gender", "Gender"),
    ("dateOfBirth", "Date of Birth"),
    ("maritalStatus", "Marital Status"),
    ("status", "Status"),
    ("membershipType", "Membership Type"),
    ("joinDate", "Join Date"),
    ("department", "Department"),
    ("address", "Address"),
    ("state", "State"),
    ("lga", "LGA"),
];

/// Rótulo de exibição de um campo. Chaves fora do catálogo viram
/// "Title Case" a partir do camelCase (`joinDate` -> `Join Date`).
pub fn field_label(field: &str) -> String {
    if let Some((_, label)) = MEMBER_FIELDS.iter().find(|(key, _)| *key == field) {
        return label.to_string();
    }

    let mut label = String::with_capacity(field.len() + 4);
    let mut prev_lower = false;
    for ch in field.chars() {
        if ch == '_' || ch == '-' {
            label.push(' ');
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower {
            label.push(' ');
        }
        if label.is_empty() || label.ends_with(' ') {
            label.extend(ch.to_uppercase());
        } else {
            label.push(ch);
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }
    label
}

// =========================================================================
//  LISTA DE FILTROS ("Where ... And ... And ...")
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct FilterList {
    kind: FilterListKind,
    filters: Vec<Filter>,
}

impl FilterList {
    /// Começa com uma linha em branco, como o formulário.
    pub fn new(kind: FilterListKind) -> Self {
        Self {
            kind,
            filters: vec![Filter::blank()],
        }
    }

    pub fn from_filters(kind: FilterListKind, filters: Vec<Filter>) -> Self {
        Self { kind, filters }
    }

    pub fn kind(&self) -> FilterListKind {
        self.kind
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Acrescenta um filtro em branco no fim e devolve o id dele.
    pub fn add_filter(&mut self) -> Uuid {
        let filter = Filter::blank();
        let id = filter.id;
        self.filters.push(filter);
        id
    }

    /// Remove pelo id. A lista genérica nunca fica vazia: remover a última
    /// linha não faz nada. Retorna se algo foi removido.
    pub fn remove_filter(&mut self, id: Uuid) -> bool {
        if self.kind == FilterListKind::Generic && self.filters.len() <= 1 {
            return false;
        }

        let before = self.filters.len();
        self.filters.retain(|f| f.id != id);
        self.filters.len() != before
    }

    pub fn update_filter(&mut self, id: Uuid, update: FilterUpdate) -> bool {
        let Some(filter) = self.filters.iter_mut().find(|f| f.id == id) else {
            return false;
        };

        match update {
            FilterUpdate::Field(field) => filter.field = field,
            FilterUpdate::Operator(operator) => filter.operator = operator,
            FilterUpdate::Value(value) => filter.value = value,
        }
        true
    }

    /// Campo e operador preenchidos; o construtor de relatórios também exige
    /// valor, menos para os operadores sem operando.
    pub fn is_valid(&self, filter: &Filter) -> bool {
        let Some(operator) = filter.operator else {
            return false;
        };
        if filter.field.trim().is_empty() {
            return false;
        }

        match self.kind {
            FilterListKind::Generic => true,
            FilterListKind::ReportBuilder => {
                !operator.takes_value() || !filter.value.trim().is_empty()
            }
        }
    }

    /// Os filtros que seguem adiante (onApply / onGenerate), na ordem original.
    pub fn valid_filters(&self) -> Vec<Filter> {
        self.filters
            .iter()
            .filter(|f| self.is_valid(f))
            .cloned()
            .collect()
    }

    /// Texto legível: `Status equals "Active" AND Join Date is empty`.
    pub fn preview(&self) -> String {
        self.filters
            .iter()
            .filter(|f| self.is_valid(f))
            .filter_map(|f| f.operator.map(|op| (f, op)))
            .map(|(f, op)| {
                let mut clause = format!("{} {}", field_label(&f.field), op.label());
                if op.takes_value() {
                    clause.push_str(&format!(" \"{}\"", f.value));
                }
                clause
            })
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

// =========================================================================
//  SERVIÇO
// =========================================================================

// Só monta e descreve o predicado. Quem executa a consulta é outro sistema.
#[derive(Clone, Default)]
pub struct ReportService;

impl ReportService {
    pub fn new() -> Self {
        Self
    }

    pub fn catalog(&self) -> ReportCatalog {
        ReportCatalog {
            fields: MEMBER_FIELDS
                .iter()
                .map(|(key, label)| FieldOption {
                    key: key.to_string(),
                    label: label.to_string(),
                })
                .collect(),
            operators: FilterOperator::ALL
                .iter()
                .map(|op| OperatorOption {
                    key: *op,
                    label: op.label().to_string(),
                    takes_value: op.takes_value(),
                })
                .collect(),
        }
    }

    pub fn preview(&self, request: ReportPreviewRequest) -> Result<ReportPreview, AppError> {
        let output_fields: Vec<String> = request
            .output_fields
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        if request.variant == FilterListKind::ReportBuilder && output_fields.is_empty() {
            return Err(AppError::EmptyOutputFields);
        }

        let list = FilterList::from_filters(request.variant, request.filters);
        let filters = list.valid_filters();
        let preview = list.preview();

        tracing::debug!(
            variant = ?list.kind(),
            received = list.filters().len(),
            valid = filters.len(),
            "Pré-visualização de relatório montada"
        );

        Ok(ReportPreview {
            filters,
            output_fields,
            preview,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(field: &str, operator: Option<FilterOperator>, value: &str) -> Filter {
        Filter {
            id: Uuid::new_v4(),
            field: field.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_preview_joins_clauses_with_and() {
        let list = FilterList::from_filters(
            FilterListKind::Generic,
            vec![
                filter("status", Some(FilterOperator::Equals), "Active"),
                filter("joinDate", Some(FilterOperator::IsEmpty), ""),
            ],
        );

        assert_eq!(list.preview(), "Status equals \"Active\" AND Join Date is empty");
    }

    #[test]
    fn test_no_operand_operator_drops_the_value_from_preview() {
        let list = FilterList::from_filters(
            FilterListKind::Generic,
            vec![filter("email", Some(FilterOperator::IsNotEmpty), "ignored")],
        );
        assert_eq!(list.preview(), "Email is not empty");
    }

    #[test]
    fn test_incomplete_filters_are_skipped() {
        let list = FilterList::from_filters(
            FilterListKind::Generic,
            vec![
                filter("", Some(FilterOperator::Equals), "x"),
                filter("gender", None, "Female"),
                filter("firstName", Some(FilterOperator::StartsWith), "Ch"),
            ],
        );

        let valid = list.valid_filters();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].field, "firstName");
        assert_eq!(list.preview(), "First Name starts with \"Ch\"");
    }

    #[test]
    fn test_generic_accepts_blank_value_but_report_builder_does_not() {
        let filters = vec![filter("department", Some(FilterOperator::Equals), "")];

        let generic = FilterList::from_filters(FilterListKind::Generic, filters.clone());
        assert_eq!(generic.valid_filters().len(), 1);

        let report = FilterList::from_filters(FilterListKind::ReportBuilder, filters);
        assert!(report.valid_filters().is_empty());
        assert_eq!(report.preview(), "");
    }

    #[test]
    fn test_report_builder_keeps_no_operand_filters_without_value() {
        let list = FilterList::from_filters(
            FilterListKind::ReportBuilder,
            vec![filter("email", Some(FilterOperator::IsEmpty), "")],
        );
        assert_eq!(list.valid_filters().len(), 1);
    }

    #[test]
    fn test_generic_list_never_removes_its_last_filter() {
        let mut list = FilterList::new(FilterListKind::Generic);
        let only = list.filters()[0].id;

        assert!(!list.remove_filter(only));
        assert_eq!(list.filters().len(), 1);

        let second = list.add_filter();
        assert!(list.remove_filter(only));
        assert_eq!(list.filters().len(), 1);
        assert_eq!(list.filters()[0].id, second);
    }

    #[test]
    fn test_report_builder_list_can_become_empty() {
        let mut list = FilterList::new(FilterListKind::ReportBuilder);
        let only = list.filters()[0].id;

        assert!(list.remove_filter(only));
        assert!(list.filters().is_empty());
    }

    #[test]
    fn test_add_appends_and_update_touches_one_entry() {
        let mut list = FilterList::new(FilterListKind::Generic);
        let first = list.filters()[0].id;
        let second = list.add_filter();
        assert_eq!(list.filters()[1].id, second);

        assert!(list.update_filter(second, FilterUpdate::Field("lga".to_string())));
        assert!(list.update_filter(second, FilterUpdate::Operator(Some(FilterOperator::Contains))));
        assert!(list.update_filter(second, FilterUpdate::Value("Ikeja".to_string())));
        assert!(!list.update_filter(Uuid::new_v4(), FilterUpdate::Value("x".to_string())));

        assert_eq!(list.filters()[0], Filter { id: first, ..Filter::blank() });
        assert_eq!(list.preview(), "LGA contains \"Ikeja\"");
    }

    #[test]
    fn test_unknown_fields_are_humanized() {
        assert_eq!(field_label("joinDate"), "Join Date");
        assert_eq!(field_label("lastAttendanceDate"), "Last Attendance Date");
        assert_eq!(field_label("home_cell"), "Home Cell");
        assert_eq!(field_label("tithe"), "Tithe");
    }

    #[test]
    fn test_report_builder_preview_requires_output_fields() {
        let service = ReportService::new();
        let request = ReportPreviewRequest {
            variant: FilterListKind::ReportBuilder,
            filters: vec![filter("status", Some(FilterOperator::Equals), "Active")],
            output_fields: vec!["  ".to_string()],
        };

        assert!(matches!(service.preview(request), Err(AppError::EmptyOutputFields)));
    }

    #[test]
    fn test_catalog_lists_every_operator() {
        let catalog = ReportService::new().catalog();
        assert_eq!(catalog.operators.len(), FilterOperator::ALL.len());
        assert!(catalog.fields.iter().any(|f| f.key == "joinDate" && f.label == "Join Date"));
    }
}
