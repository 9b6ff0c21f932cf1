//! Editor plugin — регистрация helper'а в Godot editor
//!
//! Никакой логики: только сообщение при включении/выключении plugin'а
//! (если `physics_helper/announce_plugin`, по умолчанию только debug builds).

use bz_physics::config;
use godot::classes::{EditorPlugin, IEditorPlugin};
use godot::prelude::*;

#[derive(GodotClass)]
#[class(tool, init, base=EditorPlugin)]
pub struct PhysicsHelperPlugin {
    base: Base<EditorPlugin>,
}

#[godot_api]
impl IEditorPlugin for PhysicsHelperPlugin {
    fn enter_tree(&mut self) {
        if config::active().announce_plugin {
            godot_print!("BZ Physics Helper is installed.");
        }
    }

    fn exit_tree(&mut self) {
        if config::active().announce_plugin {
            godot_print!("BZ Physics Helper is uninstalled.");
        }
    }
}
