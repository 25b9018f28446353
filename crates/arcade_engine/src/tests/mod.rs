//! Cross-module scenarios exercising the playfield, kinematics and index together
