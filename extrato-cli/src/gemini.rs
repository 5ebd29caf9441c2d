//! Gemini-backed statement interpreter: one `generateContent` request per
//! upload, JSON in, schema-constrained JSON out. No streaming, no retry.

use anyhow::{Context, Result, bail};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use extrato_core::{BankStatementData, StatementInterpreter};

use crate::config::Config;

const SYSTEM_INSTRUCTION: &str = "Você é um especialista em análise de documentos financeiros. \
Sua tarefa é converter texto bruto de extratos bancários em dados JSON limpos e normalizados. \
Ignore taxas de cabeçalho irrelevantes, foque nas linhas de transação. \
Certifique-se de que valores negativos sejam identificados como DEBIT e positivos como CREDIT.";

pub struct GeminiInterpreter {
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiInterpreter {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// Build an interpreter from config, reading the API key from the
    /// environment variable the config names.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let key = std::env::var(&cfg.llm.api_key_env).with_context(|| {
            format!(
                "variável de ambiente {} não definida (chave da API Gemini)",
                cfg.llm.api_key_env
            )
        })?;
        Ok(Self::new(cfg.llm.base_url.clone(), cfg.llm.model.clone(), key))
    }

    async fn interpret_async(&self, text: &str) -> Result<BankStatementData> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );

        let client = reqwest::Client::new();
        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&request_body(text))
            .send()
            .await
            .context("requisição ao serviço de IA")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("erro do serviço de IA: {status} {txt}");
        }

        let out: GenerateContentResponse = resp.json().await.context("parse da resposta do serviço de IA")?;
        let reply = reply_text(&out);
        let reply = reply.trim();
        if reply.is_empty() {
            bail!("Falha ao processar o extrato com IA.");
        }

        let data: BankStatementData =
            serde_json::from_str(reply).context("resposta da IA não segue o esquema de transações")?;
        Ok(data)
    }
}

impl StatementInterpreter for GeminiInterpreter {
    fn interpret(&self, text: &str) -> Result<BankStatementData> {
        // The CLI uses #[tokio::main], so we're often already inside a runtime.
        // Creating a nested runtime and calling block_on would panic.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            tokio::task::block_in_place(|| handle.block_on(self.interpret_async(text)))
        } else {
            let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
            rt.block_on(self.interpret_async(text))
        }
    }
}

fn user_prompt(text: &str) -> String {
    format!(
        "Analise o seguinte texto extraído de um extrato bancário e extraia todas as transações \
em um formato JSON estruturado.\nIdentifique o nome do banco e o período se possível.\n\n\
Texto do extrato:\n{text}\n"
    )
}

/// The output contract: `transactions` required, each entry with date,
/// description, positive amount and a CREDIT/DEBIT tag; bank name and
/// period optional at the top level.
fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "bankName": { "type": "STRING", "description": "Nome do banco" },
            "period": { "type": "STRING", "description": "Período do extrato" },
            "transactions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING", "description": "Data da transação (DD/MM/AAAA)" },
                        "description": { "type": "STRING", "description": "Descrição ou nome do favorecido/pagador" },
                        "amount": { "type": "NUMBER", "description": "Valor numérico positivo" },
                        "type": {
                            "type": "STRING",
                            "description": "CREDIT para entradas ou DEBIT para saídas",
                            "enum": ["CREDIT", "DEBIT"]
                        }
                    },
                    "required": ["date", "description", "amount", "type"]
                }
            }
        },
        "required": ["transactions"]
    })
}

fn request_body(text: &str) -> Value {
    json!({
        "systemInstruction": { "parts": [{ "text": SYSTEM_INSTRUCTION }] },
        "contents": [{ "parts": [{ "text": user_prompt(text) }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema()
        }
    })
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn reply_text(resp: &GenerateContentResponse) -> String {
    let mut s = String::new();
    if let Some(content) = resp.candidates.first().and_then(|c| c.content.as_ref()) {
        for part in &content.parts {
            if let Some(t) = &part.text {
                s.push_str(t);
            }
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = request_body("SALDO 01/01 100,00");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(
            body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("SALDO 01/01 100,00")
        );
        assert!(
            body["systemInstruction"]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .contains("DEBIT")
        );
    }

    #[test]
    fn test_schema_requires_transactions() {
        let schema = response_schema();
        assert_eq!(schema["required"][0], "transactions");
        let item_required = &schema["properties"]["transactions"]["items"]["required"];
        assert_eq!(item_required[3], "type");
        assert_eq!(
            schema["properties"]["transactions"]["items"]["properties"]["type"]["enum"][1],
            "DEBIT"
        );
    }

    #[test]
    fn test_reply_text_concatenates_parts() {
        let resp: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"transactions\""}, {"text": ": []}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(&resp), "{\"transactions\": []}");
    }

    #[test]
    fn test_reply_text_empty_when_no_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(reply_text(&resp), "");
    }
}
