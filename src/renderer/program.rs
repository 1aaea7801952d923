use super::device::{Device, ShaderStage};
use super::error::BuildError;

/// Compiles both stages, links and validates them into a new program and
/// makes it the active one.
pub fn build_program<D: Device>(
    device: &D,
    vs_source: &str,
    fs_source: &str,
) -> Result<D::Program, BuildError> {
    let program = device.create_program().ok_or(BuildError::CreateProgram)?;

    let shaders = [
        add_shader(device, program, vs_source, ShaderStage::Vertex)?,
        add_shader(device, program, fs_source, ShaderStage::Fragment)?,
    ];

    device.link_program(program);
    if !device.program_link_status(program) {
        return Err(BuildError::Link {
            log: device.program_info_log(program),
        });
    }

    // Attached shaders are only flagged; they go away with the program.
    for shader in shaders {
        device.delete_shader(shader);
    }

    device.validate_program(program);
    if !device.program_validate_status(program) {
        return Err(BuildError::Validate {
            log: device.program_info_log(program),
        });
    }

    device.use_program(program);
    log::debug!("built shader program {:?}", program);
    Ok(program)
}

fn add_shader<D: Device>(
    device: &D,
    program: D::Program,
    source: &str,
    stage: ShaderStage,
) -> Result<D::Shader, BuildError> {
    let shader = device
        .create_shader(stage)
        .ok_or(BuildError::CreateShader { stage })?;

    device.shader_source(shader, source);
    device.compile_shader(shader);
    if !device.shader_compile_status(shader) {
        return Err(BuildError::Compile {
            stage,
            log: device.shader_info_log(shader),
        });
    }

    device.attach_shader(program, shader);
    Ok(shader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recorder::{Call, Faults, Recorder};
    use crate::renderer::shader::{INTERPOLATED_FRAGMENT, VERTEX_SHADER};

    fn build(device: &Recorder) -> Result<u32, BuildError> {
        build_program(device, VERTEX_SHADER, INTERPOLATED_FRAGMENT)
    }

    #[test]
    fn links_one_shader_per_stage_then_activates() {
        let device = Recorder::new();
        let program = build(&device).unwrap();

        let calls = device.calls();
        let attached: Vec<u32> = calls
            .iter()
            .filter_map(|call| match call {
                Call::AttachShader(p, shader) if *p == program => Some(*shader),
                _ => None,
            })
            .collect();
        assert_eq!(attached.len(), 2);
        assert!(calls.contains(&Call::CreateShader(ShaderStage::Vertex, attached[0])));
        assert!(calls.contains(&Call::CreateShader(ShaderStage::Fragment, attached[1])));

        let link = calls.iter().position(|c| *c == Call::LinkProgram(program));
        let validate = calls.iter().position(|c| *c == Call::ValidateProgram(program));
        assert!(link < validate);
        assert_eq!(calls.last(), Some(&Call::UseProgram(program)));
    }

    #[test]
    fn sources_reach_the_driver() {
        let device = Recorder::new();
        build(&device).unwrap();

        let sources: Vec<String> = device
            .calls()
            .iter()
            .filter_map(|call| match call {
                Call::ShaderSource(shader) => device.shader_source_of(*shader),
                _ => None,
            })
            .collect();
        assert_eq!(sources, vec![VERTEX_SHADER, INTERPOLATED_FRAGMENT]);
    }

    #[test]
    fn shader_creation_failure() {
        let device = Recorder::with_faults(Faults {
            create_shader: Some(ShaderStage::Fragment),
            ..Faults::default()
        });
        assert_eq!(
            build(&device),
            Err(BuildError::CreateShader {
                stage: ShaderStage::Fragment
            })
        );
    }

    #[test]
    fn compile_failure_carries_the_info_log() {
        let device = Recorder::with_faults(Faults {
            compile: Some((ShaderStage::Vertex, "0:3: syntax error".to_string())),
            ..Faults::default()
        });
        let err = build(&device).unwrap_err();
        assert_eq!(
            err,
            BuildError::Compile {
                stage: ShaderStage::Vertex,
                log: "0:3: syntax error".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "error compiling vertex shader: '0:3: syntax error'"
        );
        assert!(!device
            .calls()
            .iter()
            .any(|c| matches!(c, Call::LinkProgram(_))));
    }

    #[test]
    fn program_creation_failure() {
        let device = Recorder::with_faults(Faults {
            create_program: true,
            ..Faults::default()
        });
        assert_eq!(build(&device), Err(BuildError::CreateProgram));
        assert!(device.calls().is_empty());
    }

    #[test]
    fn link_failure_stops_before_validation() {
        let device = Recorder::with_faults(Faults {
            link: Some("varying mismatch".to_string()),
            ..Faults::default()
        });
        assert_eq!(
            build(&device),
            Err(BuildError::Link {
                log: "varying mismatch".to_string()
            })
        );
        assert!(!device
            .calls()
            .iter()
            .any(|c| matches!(c, Call::ValidateProgram(_) | Call::UseProgram(_))));
    }

    #[test]
    fn validation_failure_leaves_program_inactive() {
        let device = Recorder::with_faults(Faults {
            validate: Some("no vertex array bound".to_string()),
            ..Faults::default()
        });
        let err = build(&device).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid shader program: 'no vertex array bound'"
        );
        assert!(!device
            .calls()
            .iter()
            .any(|c| matches!(c, Call::UseProgram(_))));
    }

    #[test]
    fn shaders_are_released_after_link() {
        let device = Recorder::new();
        build(&device).unwrap();
        let deleted = device
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::DeleteShader(_)))
            .count();
        assert_eq!(deleted, 2);
    }
}
