//! Optional sampling parameters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString};

/// A sampling parameter that is either switched off or carries a value.
///
/// `Disabled` means "let the engine use its own default" and is not the same
/// thing as `Enabled(0)`. On the wire it is `null`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OptionalParam<T> {
    #[default]
    Disabled,
    Enabled(T),
}

impl<T: Copy> OptionalParam<T> {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Self::Disabled => None,
            Self::Enabled(value) => Some(*value),
        }
    }
}

impl<T: ToggleDefault> OptionalParam<T> {
    /// Switches the parameter on or off.
    ///
    /// Turning an already enabled parameter on keeps its value; turning a
    /// disabled one on supplies [`ToggleDefault::TOGGLE_DEFAULT`].
    pub fn toggled(self, enabled: bool) -> Self {
        match (self, enabled) {
            (Self::Enabled(value), true) => Self::Enabled(value),
            (Self::Disabled, true) => Self::Enabled(T::TOGGLE_DEFAULT),
            (_, false) => Self::Disabled,
        }
    }
}

impl<T> From<Option<T>> for OptionalParam<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Enabled(value),
            None => Self::Disabled,
        }
    }
}

impl<T: Serialize> Serialize for OptionalParam<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Disabled => serializer.serialize_none(),
            Self::Enabled(value) => serializer.serialize_some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OptionalParam<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Value a parameter takes when it is switched on from the disabled state.
///
/// Integer-stepped parameters get 4096, fractional ones 0.7.
pub trait ToggleDefault: Copy {
    const TOGGLE_DEFAULT: Self;
}

impl ToggleDefault for f64 {
    const TOGGLE_DEFAULT: Self = 0.7;
}

impl ToggleDefault for u32 {
    const TOGGLE_DEFAULT: Self = 4096;
}

impl ToggleDefault for i32 {
    const TOGGLE_DEFAULT: Self = 4096;
}

/// Names of the four optional sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ParamName {
    Temperature,
    MaxTokens,
    TopP,
    TopK,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_null_and_zero_is_zero() {
        let disabled: OptionalParam<f64> = OptionalParam::Disabled;
        let zero = OptionalParam::Enabled(0.0_f64);

        assert_eq!(serde_json::to_string(&disabled).unwrap(), "null");
        assert_eq!(serde_json::to_string(&zero).unwrap(), "0.0");

        let back: OptionalParam<f64> = serde_json::from_str("null").unwrap();
        assert_eq!(back, OptionalParam::Disabled);
        let back: OptionalParam<f64> = serde_json::from_str("0").unwrap();
        assert_eq!(back, OptionalParam::Enabled(0.0));
        assert_ne!(back, OptionalParam::Disabled);
    }

    #[test]
    fn test_toggle_supplies_step_default() {
        assert_eq!(
            OptionalParam::<u32>::Disabled.toggled(true),
            OptionalParam::Enabled(4096)
        );
        assert_eq!(
            OptionalParam::<i32>::Disabled.toggled(true),
            OptionalParam::Enabled(4096)
        );
        assert_eq!(
            OptionalParam::<f64>::Disabled.toggled(true),
            OptionalParam::Enabled(0.7)
        );
    }

    #[test]
    fn test_toggle_keeps_existing_value() {
        assert_eq!(
            OptionalParam::Enabled(0.2_f64).toggled(true),
            OptionalParam::Enabled(0.2)
        );
        assert_eq!(
            OptionalParam::Enabled(0.2_f64).toggled(false),
            OptionalParam::Disabled
        );
    }

    #[test]
    fn test_param_name_parsing() {
        assert_eq!("max_tokens".parse::<ParamName>().unwrap(), ParamName::MaxTokens);
        assert_eq!(ParamName::TopK.to_string(), "top_k");
        assert!("top_x".parse::<ParamName>().is_err());
    }
}
