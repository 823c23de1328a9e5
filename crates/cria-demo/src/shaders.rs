use cria_engine::shader::StaticShaderLoader;

pub const COLOR_TRIANGLE: &str = "color_triangle";
pub const TINTED_TRIANGLE: &str = "tinted_triangle";
pub const TEXTURED_PLANE: &str = "textured_plane";

/// Shaders compiled into the binary. `--shader-dir` replaces them with files named
/// after the same ids.
pub fn embedded() -> StaticShaderLoader {
    StaticShaderLoader::new()
        .with(COLOR_TRIANGLE, include_str!("../shaders/color_triangle.wgsl"))
        .with(TINTED_TRIANGLE, include_str!("../shaders/tinted_triangle.wgsl"))
        .with(TEXTURED_PLANE, include_str!("../shaders/textured_plane.wgsl"))
}

#[cfg(test)]
mod tests {
    use cria_engine::shader::ShaderLoader;

    use super::*;

    #[test]
    fn every_demo_shader_is_embedded() {
        let loader = embedded();
        for id in [COLOR_TRIANGLE, TINTED_TRIANGLE, TEXTURED_PLANE] {
            let src = loader.load(id).unwrap();
            assert!(src.contains("@vertex"), "{id} has no vertex entry point");
            assert!(src.contains("@fragment"), "{id} has no fragment entry point");
        }
    }
}
