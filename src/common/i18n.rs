// src/common/i18n.rs

use std::collections::HashMap;

const DEFAULT_LANG: &str = "en";

// (chave, inglês, português)
const MESSAGES: &[(&str, &str, &str)] = &[
    ("validation_failed", "One or more fields are invalid.", "Um ou mais campos são inválidos."),
    ("guest_not_found", "Guest not found.", "Visitante não encontrado."),
    (
        "empty_output_fields",
        "Select at least one output field for the report.",
        "Selecione pelo menos um campo de saída para o relatório.",
    ),
    ("internal_error", "An unexpected error occurred.", "Ocorreu um erro inesperado."),
    // Códigos usados nas mensagens do validator
    ("required", "This field is required.", "Este campo é obrigatório."),
    ("invalid_email", "Invalid e-mail address.", "Endereço de e-mail inválido."),
];

/// Catálogo de mensagens por idioma. Idioma desconhecido cai no inglês,
/// e chave desconhecida volta como ela mesma.
#[derive(Debug, Clone)]
pub struct I18nStore {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut en = HashMap::new();
        let mut pt = HashMap::new();
        for (key, en_msg, pt_msg) in MESSAGES {
            en.insert(*key, *en_msg);
            pt.insert(*key, *pt_msg);
        }

        let mut tables = HashMap::new();
        tables.insert("en", en);
        tables.insert("pt", pt);
        Self { tables }
    }

    pub fn translate(&self, lang: &str, key: &str) -> String {
        self.tables
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| self.tables.get(DEFAULT_LANG).and_then(|table| table.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}
