use crate::registry::UnknownSymbol;
use log::debug;
use once_cell::sync::Lazy;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The comparison a filter applies to a field.
///
/// Operators differ in how many operands they take: the presence checks take
/// none, `between` takes two, everything else takes one. Filter construction
/// checks that through [`FilterOperator::operand_count`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterOperator {
    Present,
    NotPresent,
    Is,
    IsNot,
    Contains,
    NotContains,
    ContainsAny,
    ContainsNone,
    GreaterThan,
    LessThan,
    GreaterOrEqualThan,
    LessOrEqualThan,
    Between,
}

/// How many operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandCount {
    Zero,
    One,
    Two,
}

impl OperandCount {
    pub fn accepts(self, found: usize) -> bool {
        match self {
            OperandCount::Zero => found == 0,
            OperandCount::One => found == 1,
            OperandCount::Two => found == 2,
        }
    }
}

impl Display for OperandCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let spelled_out = match self {
            OperandCount::Zero => "no operands",
            OperandCount::One => "one operand",
            OperandCount::Two => "two operands",
        };

        write!(f, "{}", spelled_out)
    }
}

impl FilterOperator {
    /// Every operator, in wire code order.
    pub const ALL: [FilterOperator; 13] = [
        FilterOperator::Present,
        FilterOperator::NotPresent,
        FilterOperator::Is,
        FilterOperator::IsNot,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::ContainsAny,
        FilterOperator::ContainsNone,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::GreaterOrEqualThan,
        FilterOperator::LessOrEqualThan,
        FilterOperator::Between,
    ];

    /// The stable numeric code the remote API identifies this operator by.
    pub fn code(self) -> u8 {
        match self {
            FilterOperator::Present => 1,
            FilterOperator::NotPresent => 2,
            FilterOperator::Is => 3,
            FilterOperator::IsNot => 4,
            FilterOperator::Contains => 5,
            FilterOperator::NotContains => 6,
            FilterOperator::ContainsAny => 7,
            FilterOperator::ContainsNone => 8,
            FilterOperator::GreaterThan => 9,
            FilterOperator::LessThan => 10,
            FilterOperator::GreaterOrEqualThan => 11,
            FilterOperator::LessOrEqualThan => 12,
            FilterOperator::Between => 13,
        }
    }

    /// Looks up the operator for a raw wire code.
    pub fn from_code(code: u8) -> Result<FilterOperator, UnknownSymbol> {
        match code {
            1 => Ok(FilterOperator::Present),
            2 => Ok(FilterOperator::NotPresent),
            3 => Ok(FilterOperator::Is),
            4 => Ok(FilterOperator::IsNot),
            5 => Ok(FilterOperator::Contains),
            6 => Ok(FilterOperator::NotContains),
            7 => Ok(FilterOperator::ContainsAny),
            8 => Ok(FilterOperator::ContainsNone),
            9 => Ok(FilterOperator::GreaterThan),
            10 => Ok(FilterOperator::LessThan),
            11 => Ok(FilterOperator::GreaterOrEqualThan),
            12 => Ok(FilterOperator::LessOrEqualThan),
            13 => Ok(FilterOperator::Between),
            other => {
                debug!("rejected filter operator code {}", other);

                Err(UnknownSymbol::OperatorCode(u64::from(other)))
            }
        }
    }

    /// The symbolic name, spelled the way the API documentation spells it.
    pub fn name(self) -> &'static str {
        match self {
            FilterOperator::Present => "present",
            FilterOperator::NotPresent => "not_present",
            FilterOperator::Is => "is",
            FilterOperator::IsNot => "is_not",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "not_contains",
            FilterOperator::ContainsAny => "contains_any",
            FilterOperator::ContainsNone => "contains_none",
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::GreaterOrEqualThan => "greater_or_equal_than",
            FilterOperator::LessOrEqualThan => "less_or_equal_than",
            FilterOperator::Between => "between",
        }
    }

    /// How many operands this operator expects a filter to carry.
    ///
    /// The multi-value operators like `contains_any` still take a single
    /// operand; the remote side treats the operand itself as the thing with
    /// many candidates, not the filter.
    pub fn operand_count(self) -> OperandCount {
        match self {
            FilterOperator::Present | FilterOperator::NotPresent => OperandCount::Zero,
            FilterOperator::Is
            | FilterOperator::IsNot
            | FilterOperator::Contains
            | FilterOperator::NotContains
            | FilterOperator::ContainsAny
            | FilterOperator::ContainsNone
            | FilterOperator::GreaterThan
            | FilterOperator::LessThan
            | FilterOperator::GreaterOrEqualThan
            | FilterOperator::LessOrEqualThan => OperandCount::One,
            FilterOperator::Between => OperandCount::Two,
        }
    }
}

static BY_NAME: Lazy<HashMap<&'static str, FilterOperator>> =
    Lazy::new(|| FilterOperator::ALL.iter().map(|operator| (operator.name(), *operator)).collect());

impl FromStr for FilterOperator {
    type Err = UnknownSymbol;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        BY_NAME
            .get(name)
            .copied()
            .ok_or_else(|| UnknownSymbol::OperatorName(name.to_string()))
    }
}

impl Display for FilterOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for FilterOperator {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for FilterOperator {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u64::deserialize(deserializer)?;

        let code = u8::try_from(code)
            .map_err(|_| DeError::custom(UnknownSymbol::OperatorCode(code)))?;

        FilterOperator::from_code(code).map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_a_bijection_over_1_to_13() {
        for code in 1..=13 {
            let operator = FilterOperator::from_code(code).unwrap();

            assert_eq!(code, operator.code());
        }

        let codes: Vec<u8> = FilterOperator::ALL.iter().map(|operator| operator.code()).collect();
        assert_eq!((1..=13).collect::<Vec<u8>>(), codes);
    }

    #[test]
    fn names_round_trip() {
        for operator in FilterOperator::ALL {
            assert_eq!(Ok(operator), operator.name().parse());
        }
    }

    #[test]
    fn the_name_of_code_3_is_plain_is() {
        // Not "IS", not some escaped variation. The docs spell it bare.
        assert_eq!("is", FilterOperator::from_code(3).unwrap().name());
    }

    #[test]
    fn out_of_range_codes_are_rejected() {
        assert_eq!(Err(UnknownSymbol::OperatorCode(0)), FilterOperator::from_code(0));
        assert_eq!(Err(UnknownSymbol::OperatorCode(14)), FilterOperator::from_code(14));
    }

    #[test]
    fn unknown_names_are_rejected() {
        let error = "equals".parse::<FilterOperator>().unwrap_err();

        assert_eq!("unknown filter operator name \"equals\"", format!("{}", error));
    }

    #[test]
    fn operand_counts_match_the_api_contract() {
        assert_eq!(OperandCount::Zero, FilterOperator::Present.operand_count());
        assert_eq!(OperandCount::Zero, FilterOperator::NotPresent.operand_count());
        assert_eq!(OperandCount::Two, FilterOperator::Between.operand_count());

        for operator in FilterOperator::ALL {
            let expected = match operator.code() {
                1 | 2 => OperandCount::Zero,
                13 => OperandCount::Two,
                _ => OperandCount::One,
            };

            assert_eq!(expected, operator.operand_count(), "for {}", operator);
        }
    }

    #[test]
    fn wire_format_is_the_bare_code() {
        assert_eq!("7", serde_json::to_string(&FilterOperator::ContainsAny).unwrap());
        assert_eq!(
            FilterOperator::ContainsAny,
            serde_json::from_str::<FilterOperator>("7").unwrap()
        );
    }

    #[test]
    fn wire_decode_rejects_unknown_codes() {
        let error = serde_json::from_str::<FilterOperator>("14").unwrap_err();

        // serde_json tacks the input position onto the end of the message.
        let message = format!("{}", error);
        assert!(
            message.starts_with("unknown filter operator code 14, expected a code from 1 to 13"),
            "got: {}",
            message
        );
    }
}
