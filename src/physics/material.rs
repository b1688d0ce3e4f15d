//! Surface materials and the rules for combining two of them at a contact.

/// How two material coefficients are combined at a contact.
///
/// Variants are ordered by priority. When two materials disagree, the
/// higher-priority mode wins: `Average < Min < Max < Multiply`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombineMode {
    /// Arithmetic mean of the two coefficients.
    #[default]
    Average,
    /// Smaller of the two coefficients.
    Min,
    /// Larger of the two coefficients.
    Max,
    /// Product of the two coefficients.
    Multiply,
}

impl CombineMode {
    /// Mode to use when materials with modes `self` and `other` touch.
    #[inline]
    pub fn resolve(self, other: CombineMode) -> CombineMode {
        self.max(other)
    }

    #[inline]
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            CombineMode::Average => (a + b) * 0.5,
            CombineMode::Min => a.min(b),
            CombineMode::Max => a.max(b),
            CombineMode::Multiply => a * b,
        }
    }
}

/// Combine two coefficients of restitution.
#[inline]
pub fn combine_restitution(a: f32, b: f32, mode: CombineMode) -> f32 {
    mode.combine(a, b)
}

/// Combine two coefficients of friction.
#[inline]
pub fn combine_friction(a: f32, b: f32, mode: CombineMode) -> f32 {
    mode.combine(a, b)
}

/// Surface response properties shared between colliders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhysicsMaterial {
    /// Coefficient of restitution, 0 (no bounce) to 1 (perfectly elastic).
    pub restitution: f32,
    /// Coefficient of static friction.
    pub static_friction: f32,
    /// Coefficient of dynamic (kinetic) friction.
    pub dynamic_friction: f32,
    pub restitution_combine_mode: CombineMode,
    pub friction_combine_mode: CombineMode,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            static_friction: 0.0,
            dynamic_friction: 0.0,
            restitution_combine_mode: CombineMode::Average,
            friction_combine_mode: CombineMode::Average,
        }
    }
}

impl PhysicsMaterial {
    pub fn new(restitution: f32, static_friction: f32, dynamic_friction: f32) -> Self {
        Self {
            restitution,
            static_friction,
            dynamic_friction,
            ..Self::default()
        }
    }

    pub fn with_restitution_combine_mode(mut self, mode: CombineMode) -> Self {
        self.restitution_combine_mode = mode;
        self
    }

    pub fn with_friction_combine_mode(mut self, mode: CombineMode) -> Self {
        self.friction_combine_mode = mode;
        self
    }
}

/// Effective coefficients for a pair of touching materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedMaterial {
    pub restitution: f32,
    pub static_friction: f32,
    pub dynamic_friction: f32,
}

impl CombinedMaterial {
    pub fn new(a: &PhysicsMaterial, b: &PhysicsMaterial) -> Self {
        let restitution_mode = a.restitution_combine_mode.resolve(b.restitution_combine_mode);
        let friction_mode = a.friction_combine_mode.resolve(b.friction_combine_mode);
        Self {
            restitution: combine_restitution(a.restitution, b.restitution, restitution_mode),
            static_friction: combine_friction(a.static_friction, b.static_friction, friction_mode),
            dynamic_friction: combine_friction(
                a.dynamic_friction,
                b.dynamic_friction,
                friction_mode,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_priority_order() {
        assert!(CombineMode::Average < CombineMode::Min);
        assert!(CombineMode::Min < CombineMode::Max);
        assert!(CombineMode::Max < CombineMode::Multiply);
        assert_eq!(CombineMode::Min.resolve(CombineMode::Average), CombineMode::Min);
        assert_eq!(CombineMode::Max.resolve(CombineMode::Multiply), CombineMode::Multiply);
    }

    #[test]
    fn test_combine_modes() {
        assert_eq!(CombineMode::Average.combine(0.2, 0.6), 0.4);
        assert_eq!(CombineMode::Min.combine(0.2, 0.6), 0.2);
        assert_eq!(CombineMode::Max.combine(0.2, 0.6), 0.6);
        assert!((CombineMode::Multiply.combine(0.2, 0.6) - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_higher_priority_mode_wins() {
        let bouncy = PhysicsMaterial::new(0.9, 0.5, 0.4)
            .with_restitution_combine_mode(CombineMode::Max);
        let dull = PhysicsMaterial::new(0.1, 0.8, 0.6)
            .with_friction_combine_mode(CombineMode::Min);

        let combined = CombinedMaterial::new(&bouncy, &dull);
        assert_eq!(combined.restitution, 0.9);
        assert_eq!(combined.static_friction, 0.5);
        assert_eq!(combined.dynamic_friction, 0.4);

        // Symmetric in argument order
        assert_eq!(CombinedMaterial::new(&dull, &bouncy), combined);
    }
}
