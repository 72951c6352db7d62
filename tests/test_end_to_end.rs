use mealplan_import::{extract_recipe, ImportError};
use scraper::Html;

/// The whole pipeline over a realistic page: one JSON-LD block, prep and
/// cook times but no total, HTML entities in the ingredient text.
#[tokio::test]
async fn test_structured_page_end_to_end() {
    let html = r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Lemon Cod - Grandma's Kitchen</title>
        <script type="application/ld+json">
        {
            "@context": "https://schema.org",
            "@type": "Recipe",
            "name": "Lemon Cod",
            "description": "Weeknight baked cod with lemon &amp; herbs.",
            "prepTime": "PT10M",
            "cookTime": "PT15M",
            "recipeYield": "2",
            "recipeIngredient": [
                "2 cod fillets",
                "1  lemon, sliced"
            ],
            "recipeInstructions": [
                {"@type": "HowToStep", "text": "Season the cod."},
                {"@type": "HowToStep", "text": "Bake with lemon slices for 15 minutes."}
            ]
        }
        </script>
    </head>
    <body>
        <h1>Lemon Cod</h1>
    </body>
    </html>
    "#;

    let document = Html::parse_document(html);
    let recipe = extract_recipe(document, "https://example.com/lemon-cod", None)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Lemon Cod");
    assert_eq!(recipe.description, "Weeknight baked cod with lemon & herbs.");
    assert_eq!(recipe.ingredients, vec!["2 cod fillets", "1 lemon, sliced"]);
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.prep_time, Some(10));
    assert_eq!(recipe.cook_time, Some(15));
    // no totalTime on the page: derived from prep + cook
    assert_eq!(recipe.total_time, Some(25));
    assert_eq!(recipe.servings, Some(2));
    assert_eq!(recipe.source_url, "https://example.com/lemon-cod");
}

/// A schema-free blog post still imports through the heuristic stage.
#[tokio::test]
async fn test_heuristic_page_end_to_end() {
    let html = r#"
    <html>
    <head><title>My Cooking Blog</title></head>
    <body>
        <h1>Tuesday Tacos</h1>
        <p>These come together in twenty minutes.</p>
        <ul>
            <li>1 pound ground beef</li>
            <li>8 small flour tortillas</li>
            <li>1 cup shredded cheese</li>
        </ul>
        <ol>
            <li>Brown the beef with the spices.</li>
            <li>Warm the tortillas and assemble.</li>
        </ol>
    </body>
    </html>
    "#;

    let document = Html::parse_document(html);
    let recipe = extract_recipe(document, "https://example.com/tacos", None)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Tuesday Tacos");
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.instructions.len(), 2);
    assert_eq!(recipe.total_time, None);
}

#[tokio::test]
async fn test_not_found_carries_no_partial_data() {
    let html = r#"
    <html>
    <head><title>Top 10 Kitchen Gadgets</title></head>
    <body>
        <h1>Top 10 Kitchen Gadgets</h1>
        <p>A listicle with no recipe anywhere.</p>
    </body>
    </html>
    "#;

    // a title alone is not enough: the heuristic stage needs list content
    let document = Html::parse_document(html);
    let result = extract_recipe(document, "https://example.com/gadgets", None).await;
    assert!(matches!(result, Err(ImportError::NoRecipeFound)));
}
