// MySQL-mode data type adaptation

use crate::ast::{
    CharacterType, CollectionType, DataType, GeneralDataType, NumberType, TimestampType,
};
use crate::cst::{DataTypeNode, TypeArgNode};
use crate::error::AdaptError;

const NUMERIC_NAMES: &[&str] = &[
    "int",
    "integer",
    "tinyint",
    "smallint",
    "mediumint",
    "bigint",
    "decimal",
    "numeric",
    "dec",
    "float",
    "double",
    "double precision",
    "real",
    "bit",
];

const CHARACTER_NAMES: &[&str] = &[
    "char",
    "varchar",
    "nchar",
    "nvarchar",
    "binary",
    "varbinary",
    "tinytext",
    "text",
    "mediumtext",
    "longtext",
];

pub struct DataTypeFactory;

impl DataTypeFactory {
    pub fn generate(node: &DataTypeNode) -> Result<DataType, AdaptError> {
        let name = node.name.join(" ").to_lowercase();
        let args = Self::numeric_args(node)?;
        if NUMERIC_NAMES.contains(&name.as_str()) {
            let mut number = NumberType::new(
                &name,
                args.first().map(String::as_str),
                args.get(1).map(String::as_str),
            );
            for modifier in &node.modifiers {
                match modifier.as_str() {
                    "unsigned" => number.signed = Some(false),
                    "signed" => number.signed = Some(true),
                    "zerofill" => number.zerofill = true,
                    _ => {}
                }
            }
            return Ok(DataType::Number(number));
        }
        if CHARACTER_NAMES.contains(&name.as_str()) {
            let mut character = CharacterType::new(&name, args.first().map(String::as_str));
            character.binary = node.modifiers.iter().any(|m| m == "binary");
            character.charset = node.charset.clone();
            character.collation = node.collation.clone();
            return Ok(DataType::Character(character));
        }
        if name == "timestamp" {
            return Ok(DataType::Timestamp(TimestampType::new(
                args.first().map(String::as_str),
                false,
                false,
            )));
        }
        if name == "enum" || name == "set" {
            let mut collection = CollectionType::new(&name, node.literals.clone());
            collection.binary = node.modifiers.iter().any(|m| m == "binary");
            collection.charset = node.charset.clone();
            collection.collation = node.collation.clone();
            return Ok(DataType::Collection(collection));
        }
        Ok(DataType::General(GeneralDataType::new(&name, args)))
    }

    fn numeric_args(node: &DataTypeNode) -> Result<Vec<String>, AdaptError> {
        node.args
            .iter()
            .map(|arg| match arg {
                TypeArgNode::Number(n) => Ok(n.clone()),
                TypeArgNode::Star => Err(AdaptError::new(
                    "data_type",
                    "star precision is not a MySQL construct",
                )),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::mysql::parse_data_type;

    fn adapt(sql: &str) -> DataType {
        DataTypeFactory::generate(&parse_data_type(sql).unwrap()).unwrap()
    }

    #[test]
    fn varchar_without_length_is_accepted() {
        let dt = adapt("varchar");
        assert_eq!(dt, DataType::Character(CharacterType::new("varchar", None)));
    }

    #[test]
    fn unsigned_zerofill_decimal() {
        let dt = adapt("decimal(10, 2) unsigned zerofill");
        let mut expect = NumberType::new("decimal", Some("10"), Some("2"));
        expect.signed = Some(false);
        expect.zerofill = true;
        assert_eq!(dt, DataType::Number(expect));
    }

    #[test]
    fn exponent_precision_stays_text() {
        let dt = adapt("float(2E2)");
        match dt {
            DataType::Number(n) => assert_eq!(n.precision.as_deref(), Some("2E2")),
            other => panic!("expected number type, got {other:?}"),
        }
    }

    #[test]
    fn enum_keeps_quoted_literals_in_order() {
        let dt = adapt("enum('a', 'b', 'c')");
        match dt {
            DataType::Collection(c) => {
                assert_eq!(c.values, vec!["'a'", "'b'", "'c'"]);
            }
            other => panic!("expected collection type, got {other:?}"),
        }
    }
}
