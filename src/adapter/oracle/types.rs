// Oracle-mode data type adaptation

use crate::ast::{
    CharacterType, DataType, GeneralDataType, IntervalType, LengthOption, NumberType,
    TimestampType,
};
use crate::cst::{DataTypeNode, IntervalTypeNode, TypeArgNode};
use crate::error::AdaptError;

const NUMERIC_NAMES: &[&str] = &[
    "number",
    "numeric",
    "decimal",
    "dec",
    "float",
    "binary_float",
    "binary_double",
    "integer",
    "int",
    "smallint",
    "real",
    "double precision",
];

const CHARACTER_NAMES: &[&str] = &[
    "char", "nchar", "varchar", "varchar2", "nvarchar2", "raw",
];

/// Character types that are invalid without an explicit length in Oracle
/// mode; the grammar accepts the bare spelling, so the rejection happens
/// here.
const LENGTH_REQUIRED: &[&str] = &["varchar", "varchar2", "nvarchar2"];

pub struct DataTypeFactory;

impl DataTypeFactory {
    pub fn generate(node: &DataTypeNode) -> Result<DataType, AdaptError> {
        let name = node.name.join(" ").to_lowercase();
        if let Some(interval) = &node.interval {
            return Ok(DataType::Interval(match interval {
                IntervalTypeNode::YearToMonth { year_precision } => IntervalType::YearToMonth {
                    year_precision: year_precision.clone(),
                },
                IntervalTypeNode::DayToSecond {
                    day_precision,
                    second_precision,
                } => IntervalType::DayToSecond {
                    day_precision: day_precision.clone(),
                    second_precision: second_precision.clone(),
                },
            }));
        }
        if NUMERIC_NAMES.contains(&name.as_str()) {
            let star = node.args.first() == Some(&TypeArgNode::Star);
            let mut args = node.args.iter();
            let precision = match args.next() {
                Some(TypeArgNode::Number(n)) => Some(n.clone()),
                _ => None,
            };
            let scale = match args.next() {
                Some(TypeArgNode::Number(n)) => Some(n.clone()),
                Some(TypeArgNode::Star) => {
                    return Err(AdaptError::new("data_type", "scale cannot be *"))
                }
                None => None,
            };
            let mut number =
                NumberType::new(&name, precision.as_deref(), scale.as_deref());
            if star {
                number = number.star();
            }
            return Ok(DataType::Number(number));
        }
        if CHARACTER_NAMES.contains(&name.as_str()) {
            let length = match node.args.first() {
                Some(TypeArgNode::Number(n)) => Some(n.clone()),
                Some(TypeArgNode::Star) => {
                    return Err(AdaptError::new("data_type", "length cannot be *"))
                }
                None => None,
            };
            if length.is_none() && LENGTH_REQUIRED.contains(&name.as_str()) {
                return Err(AdaptError::new(
                    "data_type",
                    format!("{name} requires an explicit length"),
                ));
            }
            let mut character = CharacterType::new(&name, length.as_deref());
            character.length_option = node.length_unit.as_deref().map(|unit| {
                if unit.eq_ignore_ascii_case("byte") {
                    LengthOption::Byte
                } else {
                    LengthOption::Char
                }
            });
            return Ok(DataType::Character(character));
        }
        if name == "timestamp" {
            let precision = match node.args.first() {
                Some(TypeArgNode::Number(n)) => Some(n.clone()),
                _ => None,
            };
            return Ok(DataType::Timestamp(TimestampType::new(
                precision.as_deref(),
                node.with_time_zone,
                node.with_local_time_zone,
            )));
        }
        let args = node
            .args
            .iter()
            .map(|arg| match arg {
                TypeArgNode::Number(n) => Ok(n.clone()),
                TypeArgNode::Star => {
                    Err(AdaptError::new("data_type", "unexpected * argument"))
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(DataType::General(GeneralDataType::new(&name, args)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::oracle::parse_data_type;

    fn adapt(sql: &str) -> Result<DataType, AdaptError> {
        DataTypeFactory::generate(&parse_data_type(sql).unwrap())
    }

    #[test]
    fn varchar_without_length_is_a_fault() {
        let err = adapt("varchar").unwrap_err();
        assert_eq!(err.construct, "data_type");
        assert!(err.message.contains("length"));
    }

    #[test]
    fn number_star_precision_is_a_flag() {
        let dt = adapt("number(*, 2)").unwrap();
        match dt {
            DataType::Number(n) => {
                assert!(n.star_precision);
                assert_eq!(n.precision, None);
                assert_eq!(n.scale.as_deref(), Some("2"));
            }
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn varchar2_char_length_unit() {
        let dt = adapt("varchar2(10 char)").unwrap();
        match dt {
            DataType::Character(c) => {
                assert_eq!(c.length.as_deref(), Some("10"));
                assert_eq!(c.length_option, Some(LengthOption::Char));
            }
            other => panic!("expected character, got {other:?}"),
        }
    }

    #[test]
    fn timestamp_with_local_time_zone() {
        let dt = adapt("timestamp(6) with local time zone").unwrap();
        assert_eq!(
            dt,
            DataType::Timestamp(TimestampType::new(Some("6"), false, true))
        );
    }

    #[test]
    fn interval_year_to_month() {
        let dt = adapt("interval year (3) to month").unwrap();
        assert_eq!(
            dt,
            DataType::Interval(IntervalType::YearToMonth {
                year_precision: Some("3".into())
            })
        );
    }
}
