// Intentionally empty: the root package only exists to host workspace-level
// tooling such as the rusty-hook pre-commit configuration.
