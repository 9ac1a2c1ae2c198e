//! Error types for property resolution.
//!
//! The snapshot has exactly one failure of its own, raised while it is
//! being constructed. Everything else is a collaborator failure passed
//! through untouched.

use crate::codes::ArmamentCode;
use crate::property::{Size, Strength};
use thiserror::Error;

/// Boxed error returned by collaborators (health, race and table lookups).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or reading a property snapshot.
///
/// # Examples
///
/// ```rust
/// use current_properties::{PropertyError, Size, Strength};
/// use current_properties::codes::{ArmamentCode, HelmCode};
///
/// let err = PropertyError::ArmamentUnwearable {
///     armament: ArmamentCode::Helm(HelmCode::GreatHelm),
///     size: Size::new(3),
///     strength: Strength::new(7),
/// };
/// assert!(err.to_string().contains("great_helm"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertyError {
    /// A worn armament needs more strength than the wearer currently has.
    ///
    /// Raised only by [`CurrentProperties::new`](crate::CurrentProperties::new).
    #[error("'{armament}' with size {size} is too heavy to be used with strength {strength}")]
    ArmamentUnwearable {
        armament: ArmamentCode,
        size: Size,
        strength: Strength,
    },

    /// A collaborator failed; its error is forwarded unchanged.
    #[error(transparent)]
    Collaborator(#[from] BoxError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::BodyArmorCode;
    use std::error::Error as _;

    #[test]
    fn test_unwearable_display() {
        let err = PropertyError::ArmamentUnwearable {
            armament: ArmamentCode::BodyArmor(BodyArmorCode::FullPlateArmor),
            size: Size::new(3),
            strength: Strength::new(7),
        };
        let display = err.to_string();
        assert!(display.contains("full_plate_armor"));
        assert!(display.contains("size 3"));
        assert!(display.contains("strength 7"));
    }

    #[test]
    fn test_collaborator_error_is_transparent() {
        let inner: BoxError = "needs to roll against malus from wounds first".into();
        let err = PropertyError::from(inner);
        assert_eq!(
            err.to_string(),
            "needs to roll against malus from wounds first"
        );
        assert!(err.source().is_none());
    }
}
