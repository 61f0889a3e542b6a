//! Request payloads and their validation.
//!
//! Bodies are first decoded into loosely typed structs (every field a raw
//! JSON value) so that a wrong type on a single field is reported as a
//! validation failure rather than a decode failure. Field names are English;
//! the Portuguese names used by older clients are accepted as aliases.

use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::price::{Price, PriceError};
use crate::product::{NewProduct, ProductPatch, DEFAULT_CATEGORY};

const NEGATIVE_VALUES: &str = "Preço e quantidade não podem ser negativos";
const BLANK_NAME: &str = "Nome não pode ser vazio";
const NO_FIELDS: &str = "Nenhum campo enviado para atualizar";
const NOT_AN_OBJECT: &str = "Corpo da requisição deve ser um objeto JSON";

/// English field names paired with their Portuguese aliases.
const ALIASES: &[(&str, &str)] = &[
    ("name", "nome"),
    ("price", "preco"),
    ("quantity", "quantidade"),
    ("description", "descricao"),
    ("category", "categoria"),
    ("active", "ativo"),
];

/// Body of a create request.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProductBody {
    #[serde(default, alias = "nome")]
    pub name: Option<Value>,
    #[serde(default, alias = "preco")]
    pub price: Option<Value>,
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<Value>,
    #[serde(default, alias = "descricao")]
    pub description: Option<Value>,
    #[serde(default, alias = "categoria")]
    pub category: Option<Value>,
}

/// Body of an update request.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductBody {
    #[serde(default, alias = "nome")]
    pub name: Option<Value>,
    #[serde(default, alias = "preco")]
    pub price: Option<Value>,
    #[serde(default, alias = "quantidade")]
    pub quantity: Option<Value>,
    #[serde(default, alias = "descricao")]
    pub description: Option<Value>,
    #[serde(default, alias = "categoria")]
    pub category: Option<Value>,
    #[serde(default, alias = "ativo")]
    pub active: Option<Value>,
}

/// Decode a body, treating an absent body as `{}`.
///
/// Syntax errors and non-object bodies surface as `ApiError::Internal`. A
/// field sent under both its English name and its alias is a validation
/// error.
pub fn decode_body<T>(body: Option<&str>) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    let text = match body {
        None => return Ok(T::default()),
        Some(text) => text,
    };
    // Derived struct impls also accept sequences; only objects are bodies.
    match serde_json::from_str::<Value>(text)? {
        Value::Object(object) => {
            reject_aliased_twice(&object)?;
            Ok(serde_json::from_value(Value::Object(object))?)
        }
        _ => Err(ApiError::internal(NOT_AN_OBJECT)),
    }
}

fn reject_aliased_twice(object: &Map<String, Value>) -> Result<(), ApiError> {
    match ALIASES
        .iter()
        .find(|(name, alias)| object.contains_key(*name) && object.contains_key(*alias))
    {
        Some((name, alias)) => Err(invalid(name, &format!("enviado também como {}", alias))),
        None => Ok(()),
    }
}

impl CreateProductBody {
    /// Check required fields and value ranges.
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        let name = required(self.name, "name")?;
        let price = required(self.price, "price")?;
        let quantity = required(self.quantity, "quantity")?;

        Ok(NewProduct {
            name: name_field(&name)?,
            price: price_field(&price)?,
            quantity: quantity_field(&quantity)?,
            description: self
                .description
                .map(|v| text_field(&v, "description"))
                .transpose()?
                .unwrap_or_default(),
            category: self
                .category
                .map(|v| text_field(&v, "category"))
                .transpose()?
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        })
    }
}

impl UpdateProductBody {
    /// True when the body names none of the updatable fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.active.is_none()
    }

    /// Validate the present fields with the same rules as creation.
    pub fn validate(self) -> Result<ProductPatch, ApiError> {
        if self.is_empty() {
            return Err(ApiError::validation(NO_FIELDS));
        }

        Ok(ProductPatch {
            name: self.name.map(|v| name_field(&v)).transpose()?,
            price: self.price.map(|v| price_field(&v)).transpose()?,
            quantity: self.quantity.map(|v| quantity_field(&v)).transpose()?,
            description: self
                .description
                .map(|v| text_field(&v, "description"))
                .transpose()?,
            category: self
                .category
                .map(|v| text_field(&v, "category"))
                .transpose()?,
            active: self.active.map(|v| bool_field(&v, "active")).transpose()?,
        })
    }
}

fn required(value: Option<Value>, field: &str) -> Result<Value, ApiError> {
    value.ok_or_else(|| ApiError::validation(format!("Campo obrigatório faltando: {}", field)))
}

fn invalid(field: &str, expected: &str) -> ApiError {
    ApiError::validation(format!("Campo {} inválido: {}", field, expected))
}

fn text_field(value: &Value, field: &str) -> Result<String, ApiError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(field, "texto esperado"))
}

fn name_field(value: &Value) -> Result<String, ApiError> {
    let name = text_field(value, "name")?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(BLANK_NAME));
    }
    Ok(trimmed.to_string())
}

fn price_field(value: &Value) -> Result<Price, ApiError> {
    Price::from_json_non_negative(value).map_err(|e| match e {
        PriceError::Negative => ApiError::validation(NEGATIVE_VALUES),
        PriceError::NotANumber => invalid("price", "número esperado"),
    })
}

/// Integral numbers (`5`, `5.0`) and numeric strings (`"5"`) are accepted.
fn quantity_field(value: &Value) -> Result<u64, ApiError> {
    let not_an_integer = || invalid("quantity", "inteiro esperado");
    let decimal = match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()),
        Value::String(s) => BigDecimal::from_str(s.trim()),
        _ => return Err(not_an_integer()),
    }
    .map_err(|_| not_an_integer())?;

    if !decimal.is_integer() {
        return Err(not_an_integer());
    }
    if decimal < BigDecimal::from(0i64) {
        return Err(ApiError::validation(NEGATIVE_VALUES));
    }
    decimal.to_u64().ok_or_else(not_an_integer)
}

fn bool_field(value: &Value, field: &str) -> Result<bool, ApiError> {
    value
        .as_bool()
        .ok_or_else(|| invalid(field, "booleano esperado"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(body: &str) -> Result<NewProduct, ApiError> {
        decode_body::<CreateProductBody>(Some(body))?.validate()
    }

    fn update(body: &str) -> Result<ProductPatch, ApiError> {
        decode_body::<UpdateProductBody>(Some(body))?.validate()
    }

    #[test]
    fn test_create_valid() {
        let new = create(r#"{"name": "  Widget ", "price": 9.99, "quantity": 5}"#).unwrap();
        assert_eq!(new.name, "Widget");
        assert_eq!(new.price.to_string(), "9.99");
        assert_eq!(new.quantity, 5);
        assert_eq!(new.category, "geral");
        assert_eq!(new.description, "");
    }

    #[test]
    fn test_create_accepts_portuguese_aliases() {
        let new = create(
            r#"{"nome": "Caneca", "preco": "12.50", "quantidade": 3, "categoria": "cozinha"}"#,
        )
        .unwrap();
        assert_eq!(new.name, "Caneca");
        assert_eq!(new.category, "cozinha");
    }

    #[test]
    fn test_create_missing_fields_in_order() {
        let err = create(r#"{"price": 1, "quantity": 1}"#).unwrap_err();
        assert_eq!(err, ApiError::validation("Campo obrigatório faltando: name"));

        let err = create(r#"{"name": "A", "price": 1}"#).unwrap_err();
        assert_eq!(err, ApiError::validation("Campo obrigatório faltando: quantity"));
    }

    #[test]
    fn test_create_absent_body_reports_first_missing_field() {
        let err = decode_body::<CreateProductBody>(None)
            .unwrap()
            .validate()
            .unwrap_err();
        assert_eq!(err, ApiError::validation("Campo obrigatório faltando: name"));
    }

    #[test]
    fn test_create_negative_values() {
        let err = create(r#"{"name": "A", "price": -1, "quantity": 1}"#).unwrap_err();
        assert_eq!(err, ApiError::validation(NEGATIVE_VALUES));

        let err = create(r#"{"name": "A", "price": 1, "quantity": -2}"#).unwrap_err();
        assert_eq!(err, ApiError::validation(NEGATIVE_VALUES));
    }

    #[test]
    fn test_create_wrong_types() {
        assert_eq!(
            create(r#"{"name": 7, "price": 1, "quantity": 1}"#).unwrap_err(),
            ApiError::validation("Campo name inválido: texto esperado")
        );
        assert_eq!(
            create(r#"{"name": "A", "price": "cheap", "quantity": 1}"#).unwrap_err(),
            ApiError::validation("Campo price inválido: número esperado")
        );
        assert_eq!(
            create(r#"{"name": "A", "price": 1, "quantity": 1.5}"#).unwrap_err(),
            ApiError::validation("Campo quantity inválido: inteiro esperado")
        );
    }

    #[test]
    fn test_quantity_accepts_integral_numbers_and_strings() {
        for body in [
            r#"{"name": "A", "price": 1, "quantity": 5.0}"#,
            r#"{"name": "A", "price": 1, "quantity": "5"}"#,
            r#"{"name": "A", "price": 1, "quantity": " 5 "}"#,
        ] {
            assert_eq!(create(body).unwrap().quantity, 5, "{}", body);
        }
        assert_eq!(update(r#"{"quantidade": "12"}"#).unwrap().quantity, Some(12));
    }

    #[test]
    fn test_quantity_rejects_fractions_and_non_numbers() {
        for body in [
            r#"{"name": "A", "price": 1, "quantity": "1.5"}"#,
            r#"{"name": "A", "price": 1, "quantity": "lots"}"#,
            r#"{"name": "A", "price": 1, "quantity": true}"#,
            r#"{"name": "A", "price": 1, "quantity": 18446744073709551616}"#,
        ] {
            assert_eq!(
                create(body).unwrap_err(),
                ApiError::validation("Campo quantity inválido: inteiro esperado"),
                "{}",
                body
            );
        }
        assert_eq!(
            create(r#"{"name": "A", "price": 1, "quantity": "-3"}"#).unwrap_err(),
            ApiError::validation(NEGATIVE_VALUES)
        );
    }

    #[test]
    fn test_field_and_alias_together_is_rejected() {
        assert_eq!(
            create(r#"{"name": "A", "nome": "B", "price": 1, "quantity": 1}"#).unwrap_err(),
            ApiError::validation("Campo name inválido: enviado também como nome")
        );
        assert_eq!(
            update(r#"{"active": true, "ativo": false}"#).unwrap_err(),
            ApiError::validation("Campo active inválido: enviado também como ativo")
        );
    }

    #[test]
    fn test_create_blank_name() {
        let err = create(r#"{"name": "   ", "price": 1, "quantity": 1}"#).unwrap_err();
        assert_eq!(err, ApiError::validation(BLANK_NAME));
    }

    #[test]
    fn test_create_invalid_json_is_internal() {
        let err = create("{not json").unwrap_err();
        assert_eq!(err.status_code(), 500);

        let err = create("[1, 2]").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(update("{}").unwrap_err(), ApiError::validation(NO_FIELDS));
        assert_eq!(
            update(r#"{"id": "other", "created_at": "x"}"#).unwrap_err(),
            ApiError::validation(NO_FIELDS)
        );
    }

    #[test]
    fn test_update_partial() {
        let patch = update(r#"{"quantity": 10, "ativo": false}"#).unwrap();
        assert_eq!(patch.quantity, Some(10));
        assert_eq!(patch.active, Some(false));
        assert!(patch.name.is_none());
        assert!(patch.price.is_none());
    }

    #[test]
    fn test_update_validates_values() {
        assert_eq!(
            update(r#"{"price": -0.01}"#).unwrap_err(),
            ApiError::validation(NEGATIVE_VALUES)
        );
        assert_eq!(
            update(r#"{"active": "yes"}"#).unwrap_err(),
            ApiError::validation("Campo active inválido: booleano esperado")
        );
    }
}
