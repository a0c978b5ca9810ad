/// Which normals feed the active normal attribute.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShadingMode {
    /// Every corner carries the normal of its face.
    #[default]
    Flat,
    /// Every corner carries the mean normal of its canonical vertex.
    Smooth,
}

impl ShadingMode {
    /// Returns the other mode.
    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Smooth,
            ShadingMode::Smooth => ShadingMode::Flat,
        }
    }
}
