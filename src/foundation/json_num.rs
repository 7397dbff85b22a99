//! Serializers that write whole-valued coordinates as JSON integers (`100`, not `100.0`).

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::foundation::core::Point;

// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// Serialize `v` as an integer when it has no fractional part, otherwise as a float.
pub(crate) fn whole_f64<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    let v = *v;
    if v.is_finite() && v.fract() == 0.0 && v.abs() <= MAX_EXACT {
        serializer.serialize_i64(v as i64)
    } else {
        serializer.serialize_f64(v)
    }
}

/// Serialize a point as `{ "x": .., "y": .. }` with [`whole_f64`] coordinates.
pub(crate) fn whole_point<S: Serializer>(p: &Point, serializer: S) -> Result<S::Ok, S::Error> {
    let mut st = serializer.serialize_struct("Point", 2)?;
    st.serialize_field("x", &Whole(p.x))?;
    st.serialize_field("y", &Whole(p.y))?;
    st.end()
}

struct Whole(f64);

impl Serialize for Whole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        whole_f64(&self.0, serializer)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/json_num.rs"]
mod tests;
