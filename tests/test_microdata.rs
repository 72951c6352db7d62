use mealplan_import::extractors::{Extractor, MicroDataExtractor, ParsingContext};
use scraper::Html;

#[test]
fn test_microdata_extraction() {
    let html = r#"
    <html>
    <body>
    <div id="easyrecipe-557-0" class="easyrecipe" itemscope itemtype="http://schema.org/Recipe">
        <div itemprop="name" class="ERSName">Mom's Famous Banana Bread</div>
        <div itemprop="description" class="ERSSummary">Mom was kind enough to share her famous banana bread recipe with us!</div>
        <img itemprop="image" src="https://example.com/banana-bread.jpg" />
        <div itemprop="recipeCategory">Breakfast</div>
        <div itemprop="recipeCuisine">American</div>

        <div class="ERSTimes">
            <time itemprop="prepTime" datetime="PT10M">10 mins</time>
            <time itemprop="cookTime" datetime="PT1H">1 hour</time>
            <time itemprop="totalTime" datetime="PT1H10M">1 hour 10 mins</time>
        </div>

        <div class="ERSServes">Serves: <span itemprop="recipeYield">12 servings</span></div>

        <ul>
            <li class="ingredient" itemprop="ingredients">5 Tablespoons Butter (room temperature)</li>
            <li class="ingredient" itemprop="ingredients">1 Cup White Sugar</li>
            <li class="ingredient" itemprop="ingredients">1 Large Egg</li>
        </ul>

        <ol>
            <li class="instruction" itemprop="recipeInstructions">Preheat oven to 350 degrees and heavily grease a 9 inch bread pan.</li>
            <li class="instruction" itemprop="recipeInstructions">Beat butter and sugar until light, fluffy and well blended.</li>
        </ol>
    </div>
    </body>
    </html>
    "#;

    let context = ParsingContext {
        url: "https://www.cookingdivine.com/recipes/banana-bread/".to_string(),
        document: Html::parse_document(html),
    };

    let candidate = MicroDataExtractor
        .extract(&context)
        .expect("Failed to extract recipe");

    assert_eq!(candidate.name, "Mom's Famous Banana Bread");
    assert_eq!(
        candidate.description,
        "Mom was kind enough to share her famous banana bread recipe with us!"
    );
    assert_eq!(candidate.image, "https://example.com/banana-bread.jpg");
    assert_eq!(candidate.category, "Breakfast");
    assert_eq!(candidate.cuisine, "American");

    // datetime attributes win over the human-readable text
    assert_eq!(candidate.prep_time, Some(10));
    assert_eq!(candidate.cook_time, Some(60));
    assert_eq!(candidate.total_time, Some(70));
    assert_eq!(candidate.servings, Some(12));

    assert_eq!(
        candidate.ingredients,
        vec![
            "5 Tablespoons Butter (room temperature)",
            "1 Cup White Sugar",
            "1 Large Egg",
        ]
    );
    assert_eq!(candidate.instructions.len(), 2);
    assert!(candidate.instructions[0].starts_with("Preheat oven"));

    // no calorie support in microdata
    assert_eq!(candidate.calories, None);
}

#[test]
fn test_instructions_nested_in_single_container() {
    let html = r#"
    <html>
    <body>
    <div itemscope itemtype="https://schema.org/Recipe">
        <h2 itemprop="name">Garlic Butter Rice</h2>
        <span itemprop="recipeIngredient">1 cup rice</span>
        <span itemprop="recipeIngredient">2 cloves garlic</span>
        <div itemprop="recipeInstructions">
            <ol>
                <li>Rinse the rice until the water runs clear.</li>
                <li>Saute the garlic in butter, then add the rice.</li>
            </ol>
        </div>
    </div>
    </body>
    </html>
    "#;

    let context = ParsingContext {
        url: "https://example.com/garlic-rice".to_string(),
        document: Html::parse_document(html),
    };

    let candidate = MicroDataExtractor.extract(&context).unwrap();
    assert_eq!(
        candidate.instructions,
        vec![
            "Rinse the rice until the water runs clear.",
            "Saute the garlic in butter, then add the rice.",
        ]
    );
}

#[test]
fn test_no_container_yields_none() {
    let html = r#"
    <html>
    <body>
        <div itemprop="name">Not scoped to a Recipe item</div>
        <p>Some article about cooking in general.</p>
    </body>
    </html>
    "#;

    let context = ParsingContext {
        url: "https://example.com/article".to_string(),
        document: Html::parse_document(html),
    };

    assert!(MicroDataExtractor.extract(&context).is_none());
}

#[test]
fn test_empty_container_yields_none() {
    // A Recipe itemscope with nothing usable inside must not stop the
    // cascade with an empty candidate.
    let html = r#"
    <html>
    <body>
        <div itemscope itemtype="https://schema.org/Recipe">
            <span itemprop="recipeYield">4</span>
        </div>
    </body>
    </html>
    "#;

    let context = ParsingContext {
        url: "https://example.com/empty".to_string(),
        document: Html::parse_document(html),
    };

    assert!(MicroDataExtractor.extract(&context).is_none());
}
