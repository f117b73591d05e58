use alloy::primitives::U256;
use fastnum::{
    UD128, UD256, bint,
    decimal::{Context, RoundingMode, UnsignedDecimal},
};

use crate::{
    PRICE_DECIMALS,
    error::{Error, Result},
};

/// Fixed-point to decimal converter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    decimals: i32,
}

impl Converter {
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals as i32,
        }
    }

    /// Converter for a decimal count coming from outside the crate.
    pub fn try_new(decimals: i32) -> Result<Self> {
        u8::try_from(decimals)
            .map(Self::new)
            .map_err(|_| Error::InvalidScale(decimals))
    }

    pub fn decimals(&self) -> u8 {
        self.decimals as u8
    }

    /// Fails when the value does not fit the coefficient of the target width.
    pub fn from_unsigned<const N: usize>(&self, value: U256) -> Result<UnsignedDecimal<N>> {
        let unscaled = bint::UInt::<N>::from_le_slice(value.as_le_slice())
            .ok_or_else(|| Error::Overflow(value.to_string()))?;
        Ok(UnsignedDecimal::<N>::from_parts(
            unscaled,
            -self.decimals,
            Context::default().with_rounding_mode(RoundingMode::Floor),
        ))
    }

    /// Lossless conversion of any on-chain `uint256`.
    pub fn from_u256(&self, value: U256) -> UD256 {
        // 256-bit coefficient holds any U256
        self.from_unsigned(value).unwrap_or(UD256::MAX)
    }

    /// Lossless conversion of fields up to 128 bits wide.
    pub fn from_u128(&self, value: impl Into<u128>) -> UD128 {
        // 128-bit coefficient holds any u128
        self.from_unsigned(U256::from(value.into()))
            .unwrap_or(UD128::MAX)
    }

    /// Fails when the scaled value does not fit the decimal coefficient
    /// or a `uint256`.
    pub fn to_unsigned<const N: usize>(&self, value: UnsignedDecimal<N>) -> Result<U256> {
        let rescaled = value.rescale(self.decimals as i16);
        if rescaled.fractional_digits_count() as i32 != self.decimals {
            return Err(Error::Overflow(value.to_string()));
        }
        U256::try_from_le_slice(rescaled.digits().to_radix_le(256).as_slice())
            .ok_or_else(|| Error::Overflow(value.to_string()))
    }
}

/// Converts scaled on-chain integer into decimal, `raw / 10^decimals`.
///
/// Exact for any `raw` at 256-bit width, narrower widths fail with
/// [`Error::Overflow`] on values they cannot hold.
pub fn to_decimal<const N: usize>(raw: U256, decimals: i32) -> Result<UnsignedDecimal<N>> {
    Converter::try_new(decimals)?.from_unsigned(raw)
}

/// [`to_decimal`] at the default 8 decimals most amounts are stored with.
pub fn to_default_decimal(raw: U256) -> UD256 {
    Converter::new(PRICE_DECIMALS).from_u256(raw)
}

/// Parses decimal text into a scaled on-chain integer.
///
/// Text with more fractional digits than `decimals` is rejected rather
/// than rounded, as are amounts that do not fit a `uint256` once scaled.
pub fn parse_units(text: &str, decimals: u8) -> Result<U256> {
    let invalid = || Error::InvalidAmount(text.to_string());
    let value = UD256::from_str(text.trim(), Context::default()).map_err(|_| invalid())?;
    if value.rescale(decimals as i16) != value {
        return Err(invalid());
    }
    Converter::new(decimals)
        .to_unsigned(value)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use fastnum::{udec128, udec256};

    use super::*;

    #[test]
    fn test_numeric_converter_from_unsigned() {
        assert_eq!(
            Converter::new(0).from_u256(U256::from(1234567890)),
            udec256!(1234567890)
        );
        assert_eq!(
            Converter::new(8).from_u256(U256::from(1234567890)),
            udec256!(12.3456789)
        );
        assert_eq!(
            Converter::new(18).from_u256(U256::from(1234567890)),
            udec256!(0.00000000123456789)
        );
        assert_eq!(Converter::new(2).from_u128(1234u16), udec128!(12.34));
        let max = Converter::new(0).from_u128(u128::MAX);
        assert_eq!(
            Converter::new(0).to_unsigned(max).unwrap(),
            U256::from(u128::MAX)
        );
    }

    #[test]
    fn test_numeric_converter_overflow() {
        let wide = U256::from(1u64) << 130;
        assert!(matches!(
            Converter::new(8).from_unsigned::<2>(wide),
            Err(Error::Overflow(_))
        ));
        assert!(Converter::new(8).from_unsigned::<4>(wide).is_ok());

        let max = Converter::new(18).from_u256(U256::MAX);
        assert_eq!(Converter::new(18).to_unsigned(max).unwrap(), U256::MAX);
        assert!(matches!(
            Converter::new(19).to_unsigned(max),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_numeric_converter_to_unsigned() {
        assert_eq!(
            Converter::new(0).to_unsigned(udec128!(1234567890)).unwrap(),
            U256::from(1234567890)
        );
        assert_eq!(
            Converter::new(8).to_unsigned(udec128!(12.3456789)).unwrap(),
            U256::from(1234567890)
        );
        assert_eq!(
            Converter::new(2).to_unsigned(udec128!(0.5)).unwrap(),
            U256::from(50)
        );
    }

    #[test]
    fn test_to_decimal() {
        let value: UD128 = to_decimal(U256::from(250_000_000u64), 8).unwrap();
        assert_eq!(value, udec128!(2.5));

        let value: UD128 = to_decimal(U256::from(1234u64), 2).unwrap();
        assert_eq!(value, udec128!(12.34));

        let value: UD128 = to_decimal(U256::from(7u64), 0).unwrap();
        assert_eq!(value, udec128!(7));

        assert_eq!(to_default_decimal(U256::ZERO), UD256::ZERO);
    }

    #[test]
    fn test_to_decimal_full_range() {
        assert!(matches!(
            to_decimal::<2>(U256::MAX, 8),
            Err(Error::Overflow(_))
        ));

        let value: UD256 = to_decimal(U256::MAX, 8).unwrap();
        assert_eq!(value, to_default_decimal(U256::MAX));
        assert_eq!(
            Converter::new(8).to_unsigned(value).unwrap(),
            U256::MAX
        );
    }

    #[test]
    fn test_to_decimal_rejects_invalid_scale() {
        assert!(matches!(
            to_decimal::<2>(U256::from(1u64), -1),
            Err(Error::InvalidScale(-1))
        ));
        assert!(matches!(
            to_decimal::<2>(U256::from(1u64), 300),
            Err(Error::InvalidScale(300))
        ));
    }

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_units("1.5", 8).unwrap(), U256::from(150_000_000u64));
        assert_eq!(parse_units("10", 2).unwrap(), U256::from(1000u64));
        assert_eq!(parse_units(" 0.01 ", 2).unwrap(), U256::from(1u64));
        assert!(matches!(parse_units("0.001", 2), Err(Error::InvalidAmount(_))));
        assert!(matches!(parse_units("abc", 8), Err(Error::InvalidAmount(_))));
    }

    #[test]
    fn test_parse_units_wide_amounts() {
        assert_eq!(
            parse_units("100000000000000000000000", 18).unwrap(),
            U256::from(10u64).pow(U256::from(41u64))
        );
        assert!(matches!(
            parse_units("1e400", 0),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_units(&format!("{}", U256::MAX), 1),
            Err(Error::InvalidAmount(_))
        ));
    }
}
