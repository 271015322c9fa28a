pub mod output_naming;
pub mod render_wireframe_use_case;
